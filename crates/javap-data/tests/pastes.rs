use std::future::Future;
use std::sync::Arc;

use anyhow::{Context, Result};
use javap_core::{
    DefaultPasteRegistry, Paste, PasteError, PasteService, PasteStore, ProcessingInput,
    SdkRegistry, StoreError,
};
use javap_data::{PgPasteStore, connect};
use javap_test_support::mocks::EchoProcessor;
use javap_test_support::postgres::start_postgres;

async fn with_paste_store<F, Fut>(test: F) -> Result<()>
where
    F: FnOnce(PgPasteStore) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let database = match start_postgres() {
        Ok(database) => database,
        Err(err) => {
            eprintln!("skipping paste store tests: {err:#}");
            return Ok(());
        }
    };

    let pool = connect(database.connection_string(), 5)
        .await
        .context("failed to connect to test database")?;
    let store = PgPasteStore::new(pool.clone())
        .await
        .context("failed to initialise paste store")?;

    let result = test(store).await;

    pool.close().await;
    drop(database);
    result
}

fn sample(id: &str, owner: &str, code: &str) -> Paste {
    let input = ProcessingInput::new(code, "JAVA");
    Paste {
        id: id.to_string(),
        owner_token: owner.to_string(),
        output: EchoProcessor::expected(&input),
        input,
    }
}

#[tokio::test]
async fn insert_find_and_replace_paste() -> Result<()> {
    with_paste_store(|store| async move {
        let paste = sample("abc123", "owner", "one");
        store.insert(&paste).await?;
        assert_eq!(store.find_by_id("abc123").await?, Some(paste.clone()));

        let replaced = sample("abc123", "owner", "two");
        store.update(&replaced).await?;
        assert_eq!(store.find_by_id("abc123").await?, Some(replaced));

        assert_eq!(store.find_by_id("missing").await?, None);
        Ok(())
    })
    .await
}

#[tokio::test]
async fn duplicate_ids_and_missing_rows_are_reported() -> Result<()> {
    with_paste_store(|store| async move {
        store.insert(&sample("dup", "owner", "one")).await?;

        let duplicate = store.insert(&sample("dup", "other", "two")).await;
        assert!(matches!(duplicate, Err(StoreError::DuplicateId { .. })));

        let missing = store.update(&sample("ghost", "owner", "x")).await;
        assert!(matches!(missing, Err(StoreError::Missing { .. })));
        Ok(())
    })
    .await
}

#[tokio::test]
async fn paste_service_round_trips_through_postgres() -> Result<()> {
    with_paste_store(|store| async move {
        let processor = Arc::new(EchoProcessor::new());
        let defaults =
            DefaultPasteRegistry::build(&SdkRegistry::standard(), processor.as_ref()).await?;
        let service = PasteService::new(Arc::new(store), processor, Arc::new(defaults));

        let created = service
            .create(Some("abcdef"), ProcessingInput::new("test code 1", "JAVA"))
            .await?;
        let input2 = ProcessingInput::new("test code 2", "JAVA");
        let updated = service
            .update(Some("abcdef"), &created.paste.id, Some(input2.clone()))
            .await?;
        assert_eq!(updated.paste.id, created.paste.id);

        let fetched = service.get(None, &created.paste.id).await?;
        assert!(!fetched.editable);
        assert_eq!(fetched.paste.input, input2);
        assert_eq!(fetched.paste.output, EchoProcessor::expected(&input2));

        let denied = service
            .update(Some("ghijkl"), &created.paste.id, None)
            .await
            .err();
        assert!(matches!(denied, Some(PasteError::OwnershipMismatch { .. })));
        Ok(())
    })
    .await
}
