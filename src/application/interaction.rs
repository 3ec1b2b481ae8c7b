// src/application/interaction.rs
use crate::domain::DomainError;

/// Asks the user a yes/no question before a destructive action.
pub trait Confirm {
    fn confirm(&mut self, question: &str) -> bool;
}

pub trait Clipboard {
    fn copy(&mut self, text: &str) -> Result<(), DomainError>;
}

impl<T: Confirm + ?Sized> Confirm for &mut T {
    fn confirm(&mut self, question: &str) -> bool {
        (**self).confirm(question)
    }
}

impl<T: Clipboard + ?Sized> Clipboard for &mut T {
    fn copy(&mut self, text: &str) -> Result<(), DomainError> {
        (**self).copy(text)
    }
}
