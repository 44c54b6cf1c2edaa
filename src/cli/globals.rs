use secrecy::SecretString;

#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub admin_secret: SecretString,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(admin_secret: SecretString) -> Self {
        Self { admin_secret }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_global_args() {
        let args = GlobalArgs::new(SecretString::from("sesame".to_string()));
        assert_eq!(args.admin_secret.expose_secret(), "sesame");
    }
}
