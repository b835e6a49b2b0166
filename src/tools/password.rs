//! Secure password generation.

use anyhow::bail;
use rand::rngs::OsRng;
use rand::seq::SliceRandom;

const CHARSET: &[u8] =
    b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789\
      !\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

pub fn generate_password(length: usize) -> anyhow::Result<String> {
    if length < 6 {
        bail!("password must be at least 6 characters long");
    }

    let mut rng = OsRng;
    let password: String = (0..length)
        .map(|_| {
            *CHARSET
                .choose(&mut rng)
                .expect("charset is non-empty") as char
        })
        .collect();
    Ok(password)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn respects_length() {
        let password = generate_password(24).expect("should generate");
        assert_eq!(password.len(), 24);
    }

    #[test]
    fn rejects_short_lengths() {
        assert!(generate_password(5).is_err());
        assert!(generate_password(6).is_ok());
    }

    #[test]
    fn draws_only_from_charset() {
        let password = generate_password(64).expect("should generate");
        assert!(password.bytes().all(|b| CHARSET.contains(&b)));
    }
}
