use std::sync::Arc;
use std::time::Duration;

use filing_ingest::application::ports::{Capability, CapabilityLoader, PdfParser};
use filing_ingest::application::services::{BootstrapError, LibraryBootstrap};

use crate::helpers::{FakePdfLoader, FakePdfParser, LoadBehavior};

fn bootstrap_with(
    loader: &Arc<FakePdfLoader>,
    timeout: Duration,
) -> LibraryBootstrap<dyn PdfParser> {
    let loader: Arc<dyn CapabilityLoader<dyn PdfParser>> = loader.clone();
    LibraryBootstrap::with_timeout(loader, timeout)
}

fn loader(behavior: LoadBehavior) -> Arc<FakePdfLoader> {
    Arc::new(FakePdfLoader::with_behavior(
        Arc::new(FakePdfParser::default()),
        behavior,
    ))
}

#[tokio::test]
async fn given_loaded_capability_when_acquiring_again_then_loader_is_not_called() {
    let loader = loader(LoadBehavior::Ready);
    let bootstrap = bootstrap_with(&loader, Duration::from_secs(10));

    let first = bootstrap.acquire().await.unwrap();
    let second = bootstrap.acquire().await.unwrap();

    assert_eq!(loader.load_count(), 1);
    assert!(bootstrap.is_loaded());
    assert!(Arc::ptr_eq(&first, &second));
}

#[tokio::test(start_paused = true)]
async fn given_concurrent_callers_when_load_is_in_flight_then_they_share_one_load() {
    let loader = Arc::new(
        FakePdfLoader::new(Arc::new(FakePdfParser::default()))
            .with_delay(Duration::from_millis(200)),
    );
    let bootstrap = bootstrap_with(&loader, Duration::from_secs(10));

    let (a, b, c) = tokio::join!(bootstrap.acquire(), bootstrap.acquire(), bootstrap.acquire());

    assert!(a.is_ok() && b.is_ok() && c.is_ok());
    assert_eq!(loader.load_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn given_load_that_never_finishes_when_acquiring_then_times_out() {
    let loader = loader(LoadBehavior::Hang);
    let bootstrap = bootstrap_with(&loader, Duration::from_secs(10));

    let result = bootstrap.acquire().await;

    assert!(matches!(
        result,
        Err(BootstrapError::LoadTimeout(Capability::PdfParser, timeout)) if timeout == Duration::from_secs(10)
    ));
    assert!(!bootstrap.is_loaded());
}

#[tokio::test]
async fn given_failed_load_when_acquiring_again_then_a_new_attempt_is_made() {
    let loader = loader(LoadBehavior::FailFirst);
    let bootstrap = bootstrap_with(&loader, Duration::from_secs(10));

    let first = bootstrap.acquire().await;
    let second = bootstrap.acquire().await;

    assert!(matches!(
        first,
        Err(BootstrapError::LoadFailure(Capability::PdfParser, _))
    ));
    assert!(second.is_ok());
    assert_eq!(loader.load_count(), 2);
}

#[tokio::test]
async fn given_loader_that_finds_nothing_when_acquiring_then_returns_capability_not_found() {
    let loader = loader(LoadBehavior::NotFound);
    let bootstrap = bootstrap_with(&loader, Duration::from_secs(10));

    let result = bootstrap.acquire().await;

    assert!(matches!(
        result,
        Err(BootstrapError::CapabilityNotFound(Capability::PdfParser))
    ));
}

#[tokio::test]
async fn given_failing_loader_when_acquiring_then_error_names_the_capability() {
    let loader = loader(LoadBehavior::Fail);
    let bootstrap = bootstrap_with(&loader, Duration::from_secs(10));

    let error = bootstrap.acquire().await.err().unwrap();

    assert_eq!(
        error.to_string(),
        "pdf parser failed to load: library missing symbols"
    );
}
