//! Configuration for the authentication service

#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// bcrypt cost factor for account secrets
    pub password_hash_cost: u32,
    /// Minimum accepted password length at signup and reset
    pub min_password_length: usize,
    /// Send a welcome message after signup
    pub send_welcome_message: bool,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            password_hash_cost: bcrypt::DEFAULT_COST,
            min_password_length: 8,
            send_welcome_message: true,
        }
    }
}
