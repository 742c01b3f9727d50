//! Ingestion and local result storage

#[cfg(test)]
mod tests {
    use crate::common::fixtures::csv_upload;
    use crate::common::{ScriptedPolicy, TestEngine};
    use account_checker_rs::{LocalResultStore, Partition, ResultStore, parse_records};
    use tempfile::TempDir;

    #[test]
    fn test_uploaded_csv_parses_in_order() {
        let records = parse_records(&csv_upload(5)).unwrap();
        let ids: Vec<&str> = records.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["user01", "user02", "user03", "user04", "user05"]);
        assert!(records.iter().all(|r| !r.status.is_terminal()));
    }

    #[tokio::test]
    async fn test_local_store_round_trip_of_batch_outcome() {
        let engine = TestEngine::new(2, ScriptedPolicy::succeeding(["user01", "user03"]));
        let records = parse_records(&csv_upload(4)).unwrap();
        let summary = engine.coordinator.submit(records).await.unwrap().wait().await.unwrap();

        let dir = TempDir::new().unwrap();
        let store = LocalResultStore::new(dir.path().join("nested/results")).await.unwrap();
        assert!(store.base_path().exists());

        let success = store
            .write_result_file(&summary.records, Partition::Succeeded)
            .await
            .unwrap();
        let content = String::from_utf8(store.read_artifact(&success).await.unwrap()).unwrap();

        let users: Vec<&str> = content
            .lines()
            .skip(1)
            .filter_map(|l| l.split(',').next())
            .collect();
        assert_eq!(users, vec!["user01", "user03"]);
        assert!(content.lines().nth(1).unwrap().ends_with(",Success,"));
    }

    #[tokio::test]
    async fn test_artifact_names_are_unique() {
        let dir = TempDir::new().unwrap();
        let store = LocalResultStore::new(dir.path()).await.unwrap();

        let a = store.write_result_file(&[], Partition::Failed).await.unwrap();
        let b = store.write_result_file(&[], Partition::Failed).await.unwrap();
        assert_ne!(a, b);
    }
}
