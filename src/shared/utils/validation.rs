// 입력값 검증 헬퍼
// Input validation helpers shared by auth and users

pub const USERNAME_MIN: usize = 3;
pub const USERNAME_MAX: usize = 30;
pub const PASSWORD_MIN: usize = 8;

/// 이메일 형식 검사 (local@domain.tld 수준)
pub fn validate_email(email: &str) -> Result<(), String> {
    let email = email.trim();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err("Invalid email address".to_string())
    }
}

/// 사용자명: 3~30자, 영문/숫자/`_`/`.`
pub fn validate_username(username: &str) -> Result<(), String> {
    let len = username.chars().count();
    if !(USERNAME_MIN..=USERNAME_MAX).contains(&len) {
        return Err(format!(
            "Username must be between {} and {} characters",
            USERNAME_MIN, USERNAME_MAX
        ));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
    {
        return Err("Username may only contain letters, numbers, '_' and '.'".to_string());
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), String> {
    if password.chars().count() < PASSWORD_MIN {
        return Err(format!("Password must be at least {} characters", PASSWORD_MIN));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emails() {
        assert!(validate_email("student@college.edu").is_ok());
        assert!(validate_email("  a.b+c@x.io ").is_ok());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@college.edu").is_err());
        assert!(validate_email("a@nodot").is_err());
        assert!(validate_email("a@b@c.com").is_err());
        assert!(validate_email("a b@c.com").is_err());
    }

    #[test]
    fn usernames() {
        assert!(validate_username("thrift_queen").is_ok());
        assert!(validate_username("a.b").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username(&"x".repeat(31)).is_err());
        assert!(validate_username("no spaces").is_err());
        assert!(validate_username("emoji😀").is_err());
    }

    #[test]
    fn passwords() {
        assert!(validate_password("password123").is_ok());
        assert!(validate_password("short").is_err());
    }
}
