//! Property tests for stage partitioning and the move operation.

use dealflow_board::{partition, MoveOutcome, PipelineBoard};
use dealflow_core::RecordId;
use dealflow_storage::RecordStore;
use dealflow_test_utils::{arb_deal_collection, default_stages, FailingStore, InMemoryStore};
use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("test runtime")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// The union of per-stage partitions covers exactly the subset of the
    /// collection whose stage ids appear in the stage set; every deal with
    /// an unmatched stage id is excluded from every column.
    #[test]
    fn prop_partition_covers_matched_subset(deals in arb_deal_collection(40)) {
        let stages = default_stages();
        let stage_ids: HashSet<&str> = stages.iter().map(|s| s.id.as_str()).collect();
        let columns = partition(&stages, &deals);

        let placed: Vec<RecordId> = columns
            .iter()
            .flat_map(|c| c.deals.iter().map(|d| d.id))
            .collect();
        let placed_set: HashSet<RecordId> = placed.iter().copied().collect();
        // no deal lands in two columns
        prop_assert_eq!(placed.len(), placed_set.len());

        let expected: HashSet<RecordId> = deals
            .iter()
            .filter(|d| stage_ids.contains(d.stage.as_str()))
            .map(|d| d.id)
            .collect();
        prop_assert_eq!(placed_set, expected);
    }

    /// Each column's aggregate equals the exact sum of its members'
    /// values, and recomputation yields identical columns.
    #[test]
    fn prop_column_totals_are_exact_sums(deals in arb_deal_collection(40)) {
        let stages = default_stages();
        let columns = partition(&stages, &deals);

        for column in &columns {
            let expected: f64 = deals
                .iter()
                .filter(|d| d.stage == column.stage.id)
                .map(|d| d.value)
                .sum();
            prop_assert_eq!(column.total_value, expected);
        }

        prop_assert_eq!(partition(&stages, &deals), columns);
    }

    /// Members of a column keep the relative order they had in the input
    /// collection.
    #[test]
    fn prop_partition_preserves_relative_order(deals in arb_deal_collection(40)) {
        let stages = default_stages();
        let columns = partition(&stages, &deals);

        for column in &columns {
            let expected: Vec<RecordId> = deals
                .iter()
                .filter(|d| d.stage == column.stage.id)
                .map(|d| d.id)
                .collect();
            let actual: Vec<RecordId> = column.deals.iter().map(|d| d.id).collect();
            prop_assert_eq!(actual, expected);
        }
    }

    /// A same-stage move never reaches the store: against a store whose
    /// every mutation fails, it still succeeds as a no-op.
    #[test]
    fn prop_same_stage_move_never_writes(deals in arb_deal_collection(20)) {
        prop_assume!(!deals.is_empty());
        let rt = runtime();
        rt.block_on(async {
            let target = deals[0].id;
            let stage = deals[0].stage.clone();
            let store = Arc::new(FailingStore::with_data(default_stages(), deals));
            let mut board = PipelineBoard::new(store);
            board.load().await;

            let outcome = board.move_deal(target, stage).await.unwrap();
            prop_assert_eq!(outcome, MoveOutcome::SameStage);
            Ok(())
        })?;
    }

    /// Moving an id that is not in the collection is a no-op that never
    /// reaches the store and never errors.
    #[test]
    fn prop_unknown_deal_move_never_writes(deals in arb_deal_collection(20)) {
        let rt = runtime();
        rt.block_on(async {
            let unknown = deals.iter().map(|d| d.id).max().unwrap_or(0) + 1000;
            let store = Arc::new(FailingStore::with_data(default_stages(), deals));
            let mut board = PipelineBoard::new(store);
            board.load().await;

            let outcome = board.move_deal(unknown, "deal-closed".to_string()).await.unwrap();
            prop_assert_eq!(outcome, MoveOutcome::UnknownDeal);
            Ok(())
        })?;
    }

    /// After a successful move the deal appears in the target column and
    /// only there, and both columns' sums reflect the transfer.
    #[test]
    fn prop_successful_move_repartitions(deals in arb_deal_collection(20)) {
        // pick a mover that starts in a known stage
        let mover = deals.iter().find(|d| d.stage == "cold-lead").cloned();
        prop_assume!(mover.is_some());
        let mover = mover.unwrap();

        let rt = runtime();
        rt.block_on(async {
            let store = Arc::new(InMemoryStore::with_stages(default_stages()));
            for d in &deals {
                store.seed_deal(d.clone());
            }
            let mut board = PipelineBoard::new(store.clone());
            board.load().await;

            let outcome = board.move_deal(mover.id, "deal-closed".to_string()).await.unwrap();
            prop_assert_eq!(outcome, MoveOutcome::Moved);

            let columns = board.columns();
            for column in &columns {
                let here = column.deals.iter().any(|d| d.id == mover.id);
                prop_assert_eq!(here, column.stage.id == "deal-closed");
            }
            let stored = store.deal_get(mover.id).await.unwrap().unwrap();
            prop_assert_eq!(stored.stage.as_str(), "deal-closed");
            Ok(())
        })?;
    }
}
