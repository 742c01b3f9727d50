//! Batch coordinator scenarios

#[cfg(test)]
mod tests {
    use crate::common::assertions::{assert_settled, of_kind};
    use crate::common::fixtures::{numbered_records, username};
    use crate::common::{MemoryResultStore, ScriptedPolicy, TestEngine};
    use account_checker_rs::core::models::ITEM_FAULT;
    use account_checker_rs::{CheckerError, ParseError, Partition, RecordStatus, parse_records};
    use std::collections::HashSet;
    use std::time::Duration;

    fn first_n(n: usize) -> Vec<String> {
        (1..=n).map(username).collect()
    }

    // ==================== Accounting ====================

    #[tokio::test]
    async fn test_ten_records_seven_succeed() {
        let engine = TestEngine::new(3, ScriptedPolicy::succeeding(first_n(7)));

        let ticket = engine.coordinator.submit(numbered_records(10)).await.unwrap();
        assert_eq!(ticket.total, 10);
        let summary = ticket.wait().await.unwrap();

        let snapshot = &summary.snapshot;
        assert_settled(snapshot, 10);
        assert_eq!(snapshot.succeeded, 7);
        assert_eq!(snapshot.failed, 3);
        crate::assert_approx_eq!(snapshot.success_rate, 70.0);
        crate::assert_approx_eq!(snapshot.percent_complete, 100.0);

        let success_file = summary.artifacts.success_file.as_deref().unwrap();
        let fail_file = summary.artifacts.fail_file.as_deref().unwrap();
        assert_eq!(engine.store.file_count(), 2);
        assert_eq!(engine.store.data_rows(success_file).len(), 7);
        assert_eq!(engine.store.data_rows(fail_file).len(), 3);

        assert_eq!(engine.state.snapshot(), summary.snapshot);
        assert!(!engine.state.is_active());
    }

    #[tokio::test]
    async fn test_every_record_ends_terminal_in_input_order() {
        let engine = TestEngine::new(4, ScriptedPolicy::succeeding(first_n(3)));
        let summary = engine
            .coordinator
            .submit(numbered_records(12))
            .await
            .unwrap()
            .wait()
            .await
            .unwrap();

        assert_eq!(summary.records.len(), 12);
        for (i, record) in summary.records.iter().enumerate() {
            assert_eq!(record.id(), username(i + 1));
            assert!(record.status.is_terminal());
        }
        assert_eq!(engine.policy.calls(), 12);
    }

    #[tokio::test]
    async fn test_dead_unit_is_counted_as_item_fault() {
        let policy = ScriptedPolicy::succeeding(first_n(5)).with_escaping_fault([username(3)]);
        let engine = TestEngine::new(2, policy);

        let summary = engine
            .coordinator
            .submit(numbered_records(5))
            .await
            .unwrap()
            .wait()
            .await
            .unwrap();

        assert_settled(&summary.snapshot, 5);
        assert_eq!(summary.snapshot.succeeded, 4);
        assert_eq!(summary.snapshot.failed, 1);

        let dead = &summary.records[2];
        assert_eq!(dead.id(), username(3));
        assert_eq!(dead.status, RecordStatus::Failed);
        assert_eq!(dead.failure.as_ref().unwrap().code, ITEM_FAULT);

        let fail_file = summary.artifacts.fail_file.as_deref().unwrap();
        assert_eq!(engine.store.usernames(fail_file), vec![username(3)]);
        assert!(!engine.state.is_active());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_in_flight_never_exceeds_bound() {
        let policy = ScriptedPolicy::succeeding(first_n(5)).with_latency(Duration::from_millis(20));
        let engine = TestEngine::new(3, policy);

        let summary = engine
            .coordinator
            .submit(numbered_records(12))
            .await
            .unwrap()
            .wait()
            .await
            .unwrap();

        assert_settled(&summary.snapshot, 12);
        assert!(engine.state.peak_in_progress() <= 3);
        assert!(engine.state.peak_in_progress() >= 1);
        assert!(engine.policy.peak() <= 3);
    }

    // ==================== Admission ====================

    #[tokio::test]
    async fn test_second_batch_is_rejected_while_active() {
        let policy = ScriptedPolicy::succeeding(first_n(2)).with_latency(Duration::from_millis(50));
        let engine = TestEngine::new(2, policy);

        let ticket = engine.coordinator.submit(numbered_records(4)).await.unwrap();
        assert!(engine.state.is_active());

        let second = engine.coordinator.submit(numbered_records(9)).await;
        assert!(matches!(second, Err(CheckerError::Busy)));
        assert_eq!(engine.state.snapshot().total, 4);

        let summary = ticket.wait().await.unwrap();
        assert_settled(&summary.snapshot, 4);
    }

    #[tokio::test]
    async fn test_engine_accepts_again_after_completion() {
        let engine = TestEngine::new(2, ScriptedPolicy::succeeding(first_n(1)));

        engine
            .coordinator
            .submit(numbered_records(3))
            .await
            .unwrap()
            .wait()
            .await
            .unwrap();
        assert!(!engine.state.is_active());

        let summary = engine
            .coordinator
            .submit(numbered_records(5))
            .await
            .unwrap()
            .wait()
            .await
            .unwrap();
        assert_settled(&summary.snapshot, 5);
        assert_eq!(summary.snapshot.succeeded, 1);
    }

    #[tokio::test]
    async fn test_invalid_batches_touch_no_state() {
        let engine = TestEngine::new(2, ScriptedPolicy::succeeding(first_n(1)));

        let empty = engine.coordinator.submit(Vec::new()).await;
        assert!(matches!(empty, Err(CheckerError::Validation(_))));

        let mut records = numbered_records(2);
        records.push(records[0].clone());
        let duplicate = engine.coordinator.submit(records).await;
        assert!(matches!(duplicate, Err(CheckerError::Validation(_))));

        assert!(!engine.state.is_active());
        assert_eq!(engine.state.snapshot().total, 0);
    }

    #[tokio::test]
    async fn test_empty_upload_never_reaches_coordinator() {
        let engine = TestEngine::new(2, ScriptedPolicy::succeeding(first_n(1)));

        let parsed = parse_records(b"");
        assert_eq!(parsed.unwrap_err(), ParseError::EmptyInput);

        assert!(!engine.state.is_active());
        assert_eq!(engine.policy.calls(), 0);
    }

    // ==================== Artifacts ====================

    #[tokio::test]
    async fn test_partitions_are_exact() {
        let winners = vec![username(2), username(5), username(6)];
        let engine = TestEngine::new(3, ScriptedPolicy::succeeding(winners.clone()));

        let summary = engine
            .coordinator
            .submit(numbered_records(8))
            .await
            .unwrap()
            .wait()
            .await
            .unwrap();

        let success: HashSet<String> = engine
            .store
            .usernames(summary.artifacts.success_file.as_deref().unwrap())
            .into_iter()
            .collect();
        let fail: HashSet<String> = engine
            .store
            .usernames(summary.artifacts.fail_file.as_deref().unwrap())
            .into_iter()
            .collect();

        let expected: HashSet<String> = winners.into_iter().collect();
        assert_eq!(success, expected);
        assert!(success.is_disjoint(&fail));
        assert_eq!(fail.len(), 5);

        for record in &summary.records {
            let listed = success.contains(record.id());
            assert_eq!(listed, record.status == RecordStatus::Succeeded);
        }
    }

    #[tokio::test]
    async fn test_empty_partition_yields_header_only_artifact() {
        let engine = TestEngine::new(2, ScriptedPolicy::succeeding(first_n(3)));
        let summary = engine
            .coordinator
            .submit(numbered_records(3))
            .await
            .unwrap()
            .wait()
            .await
            .unwrap();

        let fail_file = summary.artifacts.fail_file.as_deref().unwrap();
        let content = engine.store.content(fail_file).unwrap();
        assert!(content.starts_with("Username,Password"));
        assert!(engine.store.data_rows(fail_file).is_empty());
    }

    #[tokio::test]
    async fn test_persistence_failure_is_reported_not_fatal() {
        let engine = TestEngine::with_store(
            2,
            ScriptedPolicy::succeeding(first_n(2)),
            MemoryResultStore::failing(Partition::Failed),
        );
        let mut observer = engine.bus.subscribe().await;

        let summary = engine
            .coordinator
            .submit(numbered_records(4))
            .await
            .unwrap()
            .wait()
            .await
            .unwrap();

        assert_settled(&summary.snapshot, 4);
        assert_eq!(summary.snapshot.failed, 2);
        assert!(summary.artifacts.success_file.is_some());
        assert!(summary.artifacts.fail_file.is_none());
        assert!(!engine.state.is_active());

        let events = engine.drain(&mut observer).await;
        let persistence: Vec<_> = of_kind(&events, "error")
            .into_iter()
            .filter(|e| e["data"]["error_code"] == "PERSISTENCE_FAILED")
            .collect();
        assert_eq!(persistence.len(), 1);
        assert_eq!(persistence[0]["data"]["partition"], "fail");

        let files = of_kind(&events, "result_files");
        assert_eq!(files.len(), 1);
        assert_eq!(files[0]["data"]["fail_file"], "");
    }

    // ==================== Event stream ====================

    #[tokio::test]
    async fn test_batch_event_sequence() {
        let engine = TestEngine::new(3, ScriptedPolicy::succeeding(first_n(4)));
        let mut observer = engine.bus.subscribe().await;

        engine
            .coordinator
            .submit(numbered_records(6))
            .await
            .unwrap()
            .wait()
            .await
            .unwrap();

        let events = engine.drain(&mut observer).await;

        let first = &events[0];
        assert_eq!(first["type"], "process_start");
        assert_eq!(first["data"]["total"], 6);
        assert_eq!(events[1]["type"], "progress");
        assert_eq!(events[1]["data"]["processed"], 0);

        let processed: Vec<u64> = of_kind(&events, "progress")
            .iter()
            .map(|e| e["data"]["processed"].as_u64().unwrap())
            .collect();
        assert!(processed.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(processed.last(), Some(&6));

        assert_eq!(of_kind(&events, "result").len(), 4);
        assert_eq!(of_kind(&events, "transaction").len(), 4);
        assert_eq!(of_kind(&events, "error").len(), 2);

        let tail: Vec<&str> = events[events.len() - 2..]
            .iter()
            .map(|e| e["type"].as_str().unwrap())
            .collect();
        assert_eq!(tail, vec!["result_files", "general"]);
        assert_eq!(events.last().unwrap()["data"]["success"], 4);
    }

    #[tokio::test]
    async fn test_steps_are_ordered_per_record() {
        let engine = TestEngine::new(3, ScriptedPolicy::succeeding(first_n(6)));
        let mut observer = engine.bus.subscribe().await;

        engine
            .coordinator
            .submit(numbered_records(6))
            .await
            .unwrap()
            .wait()
            .await
            .unwrap();

        let events = engine.drain(&mut observer).await;
        for n in 1..=6 {
            let name = username(n);
            let steps: Vec<u64> = of_kind(&events, "step")
                .iter()
                .filter(|e| e["data"]["username"] == name.as_str())
                .map(|e| e["data"]["step_number"].as_u64().unwrap())
                .collect();
            assert_eq!(steps, vec![1, 2, 3, 4], "steps of {}", name);
        }
    }

    #[tokio::test]
    async fn test_busy_rejection_emits_warning() {
        let policy = ScriptedPolicy::succeeding(first_n(1)).with_latency(Duration::from_millis(30));
        let engine = TestEngine::new(1, policy);
        let mut observer = engine.bus.subscribe().await;

        let ticket = engine.coordinator.submit(numbered_records(2)).await.unwrap();
        let _ = engine.coordinator.submit(numbered_records(2)).await;
        ticket.wait().await.unwrap();

        let events = engine.drain(&mut observer).await;
        let warnings: Vec<_> = events.iter().filter(|e| e["level"] == "WARN").collect();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0]["type"], "general");
        assert!(warnings[0]["data"].is_null());
    }
}
