use std::fmt::Display;

/// Shorten a count for display: `1234` becomes `1.2k`, `100000` becomes
/// `100k`, `5200000` becomes `5M`.
///
/// Works on the decimal digits of whatever is passed in, so numeric strings
/// are accepted as well as integers. Digits are truncated, never rounded.
pub fn number_to_kilo(number: impl Display) -> String {
    let digits: Vec<char> = number.to_string().chars().collect();
    let len = digits.len();

    match len {
        0..=3 => digits.iter().collect(),
        4 | 5 => {
            let whole: String = digits[..len - 3].iter().collect();
            format!("{whole}.{}k", digits[len - 3])
        }
        6 => {
            let whole: String = digits[..3].iter().collect();
            format!("{whole}k")
        }
        _ => {
            let whole: String = digits[..len - 6].iter().collect();
            format!("{whole}M")
        }
    }
}
