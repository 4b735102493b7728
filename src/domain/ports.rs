use crate::domain::model::{CadastralNumber, ParcelRecord};
use crate::utils::error::{Result, SurveyError};
use async_trait::async_trait;

/// Resolves a cadastral number to a full parcel record.
///
/// Implementations must distinguish not-found, transport and timeout
/// failures through the error variants so the caller can report them
/// differently.
#[async_trait]
pub trait ParcelLookup: Send + Sync {
    async fn lookup(&self, cadastral_number: &CadastralNumber) -> Result<ParcelRecord>;
}

/// Outbound notification channel of the session. The UI (or CLI) decides how
/// each event is surfaced; the session controller only guarantees when each
/// fires.
pub trait Notifier: Send + Sync {
    /// The submitted input failed the grammar check. Fired exactly once per
    /// rejected submit; no lookup was issued.
    fn validation_error(&self, input: &str);

    /// A lookup completed and `record` is now the displayed record.
    fn lookup_succeeded(&self, record: &ParcelRecord);

    /// A lookup failed; the previously displayed record is untouched.
    fn lookup_failed(&self, error: &SurveyError);
}

pub trait ConfigProvider: Send + Sync {
    fn endpoint(&self) -> &str;
    fn timeout_secs(&self) -> u64;
    fn demo_mode(&self) -> bool;
}
