//! Simulated account list. There is no authentication service: passwords are only checked for
//! presence and are never kept.

use shared::error::ProfileError;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub email: String,
}

#[derive(Debug, Default)]
pub struct AccountDirectory {
    accounts: Vec<Account>,
    active: Option<usize>,
}

impl AccountDirectory {
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn active(&self) -> Option<&Account> {
        self.active.and_then(|index| self.accounts.get(index))
    }

    /// Signs in, adding the account to this device if it is not listed yet.
    pub fn log_in(&mut self, email: &str, password: &str) -> Result<&Account, ProfileError> {
        let email = validate(email, password)?;
        let index = match self.position(&email) {
            Some(index) => index,
            None => self.push(email),
        };
        self.active = Some(index);
        info!(email = %self.accounts[index].email, "logged in");
        Ok(&self.accounts[index])
    }

    pub fn register(&mut self, email: &str, password: &str) -> Result<&Account, ProfileError> {
        let email = validate(email, password)?;
        if self.position(&email).is_some() {
            return Err(ProfileError::AlreadyRegistered(email));
        }
        let index = self.push(email);
        self.active = Some(index);
        info!(email = %self.accounts[index].email, "registered account");
        Ok(&self.accounts[index])
    }

    pub fn switch_to(&mut self, email: &str) -> Result<&Account, ProfileError> {
        let index = self
            .position(email.trim())
            .ok_or_else(|| ProfileError::UnknownAccount(email.trim().to_string()))?;
        self.active = Some(index);
        Ok(&self.accounts[index])
    }

    fn position(&self, email: &str) -> Option<usize> {
        self.accounts
            .iter()
            .position(|account| account.email.eq_ignore_ascii_case(email))
    }

    fn push(&mut self, email: String) -> usize {
        self.accounts.push(Account { email });
        self.accounts.len() - 1
    }
}

fn validate(email: &str, password: &str) -> Result<String, ProfileError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ProfileError::MissingEmail);
    }
    if password.trim().is_empty() {
        return Err(ProfileError::MissingPassword);
    }
    Ok(email.to_string())
}
