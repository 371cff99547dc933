use regex::Regex;

/// Common webmail domains and the typos users actually make for them.
/// Used to suggest a correction instead of silently accepting a dead address.
const DOMAIN_TYPOS: &[(&str, &str)] = &[
    ("gmial.com", "gmail.com"),
    ("gamil.com", "gmail.com"),
    ("gmail.co", "gmail.com"),
    ("gmai.com", "gmail.com"),
    ("hotmial.com", "hotmail.com"),
    ("hotmal.com", "hotmail.com"),
    ("outlok.com", "outlook.com"),
    ("yahooo.com", "yahoo.com"),
    ("yaho.com.br", "yahoo.com.br"),
];

/// Returns the corrected address when the domain looks like a typo of a
/// well-known provider.
pub fn suggest_email_correction(email: &str) -> Option<String> {
    let (local, domain) = email.split_once('@')?;
    let domain = domain.to_ascii_lowercase();
    DOMAIN_TYPOS
        .iter()
        .find(|(typo, _)| *typo == domain)
        .map(|(_, fixed)| format!("{}@{}", local, fixed))
}

/// Brazilian phone: 10 digits (landline) or 11 (mobile), optional +55 prefix,
/// separators ignored.
pub fn is_valid_phone(phone: &str) -> bool {
    let re = Regex::new(r"^\+?[\d\s().-]+$").unwrap();
    if !re.is_match(phone) {
        return false;
    }
    let mut digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() == 12 || digits.len() == 13 {
        if let Some(rest) = digits.strip_prefix("55") {
            digits = rest.to_string();
        }
    }
    digits.len() == 10 || digits.len() == 11
}

/// CPF check with the standard mod-11 verifier digits. Separators are
/// ignored; repeated-digit sequences (000..., 111...) are invalid.
pub fn is_valid_cpf(cpf: &str) -> bool {
    let digits: Vec<u32> = cpf.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() != 11 {
        return false;
    }
    if digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    let verifier = |len: usize| -> u32 {
        let sum: u32 = digits[..len]
            .iter()
            .enumerate()
            .map(|(i, &d)| d * (len as u32 + 1 - i as u32))
            .sum();
        let rem = (sum * 10) % 11;
        if rem == 10 {
            0
        } else {
            rem
        }
    };

    verifier(9) == digits[9] && verifier(10) == digits[10]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpf_accepts_valid_numbers() {
        assert!(is_valid_cpf("529.982.247-25"));
        assert!(is_valid_cpf("52998224725"));
    }

    #[test]
    fn cpf_rejects_bad_checksums_and_repeats() {
        assert!(!is_valid_cpf("529.982.247-26"));
        assert!(!is_valid_cpf("111.111.111-11"));
        assert!(!is_valid_cpf("12345"));
    }

    #[test]
    fn phone_formats() {
        assert!(is_valid_phone("(85) 98765-4321"));
        assert!(is_valid_phone("8532104321"));
        assert!(is_valid_phone("+55 85 98765-4321"));
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("not-a-phone"));
    }

    #[test]
    fn email_typos_get_suggestions() {
        assert_eq!(
            suggest_email_correction("joao@gmial.com").as_deref(),
            Some("joao@gmail.com")
        );
        assert_eq!(suggest_email_correction("joao@gmail.com"), None);
        assert_eq!(suggest_email_correction("sem-arroba"), None);
    }
}
