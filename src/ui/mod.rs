use anyhow::Result;
use inquire::InquireError;

mod spinner;
mod style;

pub use spinner::Spinner;
pub use style::Style;

/// Returns `true` when the prompt error is a Ctrl+C or Escape.
pub const fn is_prompt_cancelled(err: &InquireError) -> bool {
    matches!(
        err,
        InquireError::OperationCanceled | InquireError::OperationInterrupted
    )
}

/// Runs an interactive operation, turning a user cancellation into a clean exit.
///
/// Cancellation prints a newline to tidy the terminal and yields `Ok(())`.
pub async fn handle_prompt_cancellation<F>(f: F) -> Result<()>
where
    F: Future<Output = Result<()>>,
{
    match f.await {
        Ok(()) => Ok(()),
        Err(e)
            if e.downcast_ref::<InquireError>()
                .is_some_and(is_prompt_cancelled) =>
        {
            println!();
            Ok(())
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_handle_prompt_cancellation_ok() {
        let result = handle_prompt_cancellation(async { Ok(()) }).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_handle_prompt_cancellation_swallows_cancel() {
        let result =
            handle_prompt_cancellation(async { Err(InquireError::OperationCanceled.into()) })
                .await;
        assert!(result.is_ok());

        let result =
            handle_prompt_cancellation(async { Err(InquireError::OperationInterrupted.into()) })
                .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_handle_prompt_cancellation_other_error() {
        let result =
            handle_prompt_cancellation(async { Err(anyhow::anyhow!("backend exploded")) }).await;
        let Err(err) = result else {
            panic!("expected an error");
        };
        assert!(err.to_string().contains("backend exploded"));
    }

    #[test]
    fn test_is_prompt_cancelled_other_error() {
        assert!(!is_prompt_cancelled(&InquireError::Custom("test".into())));
        assert!(is_prompt_cancelled(&InquireError::OperationCanceled));
    }
}
