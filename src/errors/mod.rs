mod heal_errors;
mod ui_errors;

pub use heal_errors::*;
pub use ui_errors::*;

pub trait AsError {
    fn as_error<E: std::error::Error + 'static>(&self) -> Option<&E>;
}

impl AsError for anyhow::Error {
    fn as_error<E: std::error::Error + 'static>(&self) -> Option<&E> {
        for cause in self.chain() {
            if let Some(err) = cause.downcast_ref::<E>() {
                return Some(err);
            }
        }
        None
    }
}

impl AsError for std::io::Error {
    fn as_error<E: std::error::Error + 'static>(&self) -> Option<&E> {
        if let Some(err) = self.get_ref() {
            if let Some(err) = err.downcast_ref::<E>() {
                return Some(err);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_error_walks_anyhow_chain() {
        let err = anyhow::Error::new(HealError::InvalidParity {
            surplus: 3,
            parity: 2,
        })
        .context("unable to classify heal result");
        let found = err.as_error::<HealError>().unwrap();
        assert!(matches!(found, HealError::InvalidParity { .. }));
        assert!(err.as_error::<std::io::Error>().is_none());
    }
}
