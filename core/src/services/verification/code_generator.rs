//! One-time code generation

use rand::{rngs::OsRng, Rng};

/// Produces 6-digit decimal codes
pub trait CodeGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Uniform over 100000..=999999, drawn from the OS CSPRNG
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        let code: u32 = OsRng.gen_range(100_000..=999_999);
        code.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::CODE_LENGTH;
    use std::collections::HashSet;

    #[test]
    fn test_generated_code_format() {
        let generator = RandomCodeGenerator;
        for _ in 0..1000 {
            let code = generator.generate();
            assert_eq!(code.len(), CODE_LENGTH);
            assert!(code.chars().all(|c| c.is_ascii_digit()));

            let value: u32 = code.parse().unwrap();
            assert!((100_000..=999_999).contains(&value));
        }
    }

    #[test]
    fn test_codes_vary() {
        let generator = RandomCodeGenerator;
        let codes: HashSet<String> = (0..100).map(|_| generator.generate()).collect();
        assert!(codes.len() > 1);
    }
}
