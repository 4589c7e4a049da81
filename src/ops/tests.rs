// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Trailmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Trailmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::{Duration, Instant};

use rstest::{fixture, rstest};

use super::{CollectionError, Filter, SortDirection, SortField, WorkoutCollection};
use crate::model::{fixtures, Coords, WorkoutField, WorkoutId, WorkoutInput, WorkoutKind};
use crate::store::{KeyValueStore, MemoryStore, WorkoutArchive, WORKOUTS_KEY};
use crate::view::{RecordingViewPort, ViewCall};

type TestCollection = WorkoutCollection<RecordingViewPort, MemoryStore>;

const DELAY: Duration = Duration::from_millis(1200);

fn collection_over(store: MemoryStore) -> TestCollection {
    WorkoutCollection::new(RecordingViewPort::new(), WorkoutArchive::new(store))
        .with_clock(fixtures::frozen_clock)
        .with_delete_delay(DELAY)
}

#[fixture]
fn collection() -> TestCollection {
    collection_over(MemoryStore::new())
}

fn spot() -> Coords {
    Coords::new(39.0, -12.0).expect("coords")
}

fn add(collection: &mut TestCollection, input: WorkoutInput) -> WorkoutId {
    collection.create(spot(), &input).expect("create").id().clone()
}

fn add_run(collection: &mut TestCollection, distance: f64) -> WorkoutId {
    add(collection, WorkoutInput::running(distance, distance * 5.0, 170.0))
}

fn add_ride(collection: &mut TestCollection, distance: f64) -> WorkoutId {
    add(collection, WorkoutInput::cycling(distance, distance * 3.0, 100.0))
}

fn displayed_distances(collection: &TestCollection) -> Vec<f64> {
    collection.displayed_workouts().map(|w| w.distance()).collect()
}

fn reloaded_ids(collection: &TestCollection) -> Vec<String> {
    collection
        .archive()
        .load()
        .iter()
        .map(|w| w.id().to_string())
        .collect()
}

/// Markers on the view match the workouts the collection considers visible.
fn assert_markers_match_filter(collection: &TestCollection) {
    let mut expected = collection
        .workouts()
        .iter()
        .filter(|w| collection.filter().matches(w.kind()))
        .map(|w| w.id().as_str())
        .collect::<Vec<_>>();
    expected.sort_unstable();
    assert_eq!(collection.view().marker_ids(), expected);
    for workout in collection.workouts() {
        assert_eq!(workout.marker().is_some(), collection.filter().matches(workout.kind()));
    }
}

#[rstest]
fn create_running_adds_renders_and_persists(mut collection: TestCollection) {
    let workout = collection
        .create(spot(), &WorkoutInput::running(5.2, 24.0, 178.0))
        .expect("create")
        .clone();

    assert_eq!(collection.len(), 1);
    assert!((workout.pace().expect("pace") - 4.615).abs() < 1e-3);
    assert_eq!(workout.pace(), Some(24.0 / 5.2));
    assert!(!workout.description().is_empty());
    assert_eq!(workout.coords(), spot());

    assert_eq!(collection.view().entry_ids(), vec![workout.id().as_str()]);
    assert_eq!(collection.view().marker_count(), 1);
    assert_eq!(reloaded_ids(&collection), vec![workout.id().to_string()]);
}

#[rstest]
#[case(523.0)]
#[case(0.0)]
#[case(-523.0)]
fn create_cycling_accepts_any_elevation_sign(mut collection: TestCollection, #[case] elevation: f64) {
    let workout = collection
        .create(spot(), &WorkoutInput::cycling(27.0, 95.0, elevation))
        .expect("create");
    assert_eq!(workout.speed(), Some(27.0 / (95.0 / 60.0)));
    assert!((workout.speed().expect("speed") - 17.05).abs() < 1e-2);
}

#[rstest]
fn create_rejects_invalid_input_without_side_effects(mut collection: TestCollection) {
    collection.view_mut().clear_calls();

    let err = collection
        .create(spot(), &WorkoutInput::running(5.0, 20.0, -1.0))
        .unwrap_err();

    let CollectionError::Validation(err) = err else {
        panic!("expected validation error, got: {err:?}");
    };
    assert!(err.contains(WorkoutField::Cadence));
    assert!(collection.is_empty());
    assert!(collection.view().calls().is_empty());
    assert_eq!(collection.archive().backend().get(WORKOUTS_KEY).unwrap(), None);
}

#[rstest]
#[case::pace(WorkoutInput::running(1e-300, 1e300, 170.0))]
#[case::speed(WorkoutInput::cycling(1e308, 1e-10, 0.0))]
fn create_rejects_overflowing_metric_without_side_effects(
    mut collection: TestCollection,
    #[case] input: WorkoutInput,
) {
    collection.view_mut().clear_calls();

    let err = collection.create(spot(), &input).unwrap_err();

    let CollectionError::Validation(err) = err else {
        panic!("expected validation error, got: {err:?}");
    };
    assert!(err.contains(WorkoutField::Metric));
    assert!(collection.is_empty());
    assert!(collection.view().calls().is_empty());
    assert!(reloaded_ids(&collection).is_empty());
}

#[rstest]
fn extreme_magnitudes_survive_a_reload(mut collection: TestCollection) {
    add(&mut collection, WorkoutInput::running(1e-3, 1e300, 170.0));
    add(&mut collection, WorkoutInput::cycling(1e300, 1.0, -1e300));
    add(&mut collection, WorkoutInput::running(5e-324, 5e-324, 5e-324));

    let reloaded = collection.archive().load();
    assert_eq!(reloaded.len(), 3);
    for (kept, restored) in collection.workouts().iter().zip(&reloaded) {
        assert!(kept.same_record(restored), "{kept:?} != {restored:?}");
        assert!(restored.detail().metric().is_finite());
    }
}

#[rstest]
fn create_assigns_unique_ids_within_the_same_millisecond(mut collection: TestCollection) {
    let a = add_run(&mut collection, 5.0);
    let b = add_run(&mut collection, 6.0);
    let c = add_ride(&mut collection, 20.0);
    assert_ne!(a, b);
    assert_ne!(b, c);
    assert_ne!(a, c);
}

#[rstest]
fn create_is_refused_while_editing(mut collection: TestCollection) {
    let id = add_run(&mut collection, 5.0);
    collection.begin_edit(&id).expect("begin");

    let err = collection
        .create(spot(), &WorkoutInput::running(3.0, 15.0, 160.0))
        .unwrap_err();
    assert_eq!(err, CollectionError::EditInProgress { editing: id });
    assert_eq!(collection.len(), 1);
}

#[rstest]
fn create_while_filtered_out_persists_but_does_not_render(mut collection: TestCollection) {
    assert_eq!(collection.cycle_filter(), Filter::Running);
    let ride = add_ride(&mut collection, 20.0);

    assert_eq!(collection.len(), 1);
    assert!(collection.view().entries().is_empty());
    assert_eq!(collection.view().marker_count(), 0);
    assert_eq!(reloaded_ids(&collection), vec![ride.to_string()]);
}

#[rstest]
fn begin_edit_returns_snapshot_and_guards_other_targets(mut collection: TestCollection) {
    let run = add(&mut collection, WorkoutInput::running(5.2, 24.0, 178.0));
    let ride = add_ride(&mut collection, 20.0);

    let snapshot = collection.begin_edit(&run).expect("begin");
    assert_eq!(snapshot, WorkoutInput::running(5.2, 24.0, 178.0));

    assert_eq!(
        collection.begin_edit(&ride).unwrap_err(),
        CollectionError::EditInProgress { editing: run.clone() }
    );
    collection.begin_edit(&run).expect("same target refreshes");
    assert_eq!(collection.edit_session().target_id(), Some(&run));
}

#[rstest]
fn begin_edit_of_unknown_id_is_not_found(mut collection: TestCollection) {
    let missing = WorkoutId::new("nope").expect("id");
    assert_eq!(
        collection.begin_edit(&missing).unwrap_err(),
        CollectionError::NotFound { workout_id: missing }
    );
    assert!(!collection.edit_session().is_open());
}

#[rstest]
fn commit_edit_replaces_in_place_with_fresh_id(mut collection: TestCollection) {
    add_run(&mut collection, 5.0);
    let target = add_run(&mut collection, 6.0);
    add_run(&mut collection, 7.0);
    let original_coords = collection.get(&target).expect("target").coords();

    collection.begin_edit(&target).expect("begin");
    let replacement = collection
        .commit_edit(&WorkoutInput::cycling(30.0, 90.0, -50.0))
        .expect("commit")
        .clone();

    assert_ne!(replacement.id(), &target);
    assert_eq!(replacement.kind(), WorkoutKind::Cycling);
    assert_eq!(replacement.coords(), original_coords);
    assert_eq!(collection.index_of(replacement.id()), Some(1));
    assert_eq!(collection.len(), 3);
    assert!(collection.get(&target).is_none());
    assert!(!collection.edit_session().is_open());

    assert_markers_match_filter(&collection);
    assert_eq!(collection.view().entries().len(), 3);
    assert_eq!(reloaded_ids(&collection)[1], replacement.id().to_string());
}

#[rstest]
fn commit_edit_with_invalid_input_keeps_session_and_workout(mut collection: TestCollection) {
    let target = add_run(&mut collection, 5.0);
    collection.begin_edit(&target).expect("begin");

    let err = collection
        .commit_edit(&WorkoutInput::parse(WorkoutKind::Running, "", "20", "170"))
        .unwrap_err();

    assert!(matches!(err, CollectionError::Validation(_)));
    assert!(collection.edit_session().targets(&target));
    assert_eq!(collection.get(&target).expect("untouched").distance(), 5.0);
}

#[rstest]
fn commit_edit_without_session_is_rejected(mut collection: TestCollection) {
    add_run(&mut collection, 5.0);
    assert_eq!(
        collection
            .commit_edit(&WorkoutInput::running(1.0, 5.0, 150.0))
            .unwrap_err(),
        CollectionError::NoActiveEdit
    );
}

#[rstest]
fn cancel_edit_is_idempotent(mut collection: TestCollection) {
    let id = add_run(&mut collection, 5.0);
    collection.begin_edit(&id).expect("begin");
    assert!(collection.cancel_edit());
    assert!(!collection.cancel_edit());
    assert_eq!(collection.len(), 1);
}

#[rstest]
fn delete_one_removes_persists_and_focuses(mut collection: TestCollection) {
    let keep = add_run(&mut collection, 5.0);
    let doomed = add_ride(&mut collection, 20.0);
    let coords = collection.get(&doomed).expect("doomed").coords();

    let removed = collection.delete_one(&doomed).expect("delete");

    assert_eq!(removed.id(), &doomed);
    assert_eq!(collection.len(), 1);
    assert_eq!(reloaded_ids(&collection), vec![keep.to_string()]);
    assert_eq!(collection.view().entry_ids(), vec![keep.as_str()]);
    assert_eq!(collection.view().marker_ids(), vec![keep.as_str()]);
    assert_eq!(collection.view().focus(), Some(coords));
}

#[rstest]
fn delete_one_of_edit_target_closes_the_session(mut collection: TestCollection) {
    let id = add_run(&mut collection, 5.0);
    collection.begin_edit(&id).expect("begin");
    collection.delete_one(&id).expect("delete");

    assert!(!collection.edit_session().is_open());
    assert_eq!(
        collection
            .commit_edit(&WorkoutInput::running(1.0, 5.0, 150.0))
            .unwrap_err(),
        CollectionError::NoActiveEdit
    );
}

#[rstest]
fn delete_one_of_unknown_id_is_not_found(mut collection: TestCollection) {
    add_run(&mut collection, 5.0);
    let missing = WorkoutId::new("missing").expect("id");
    assert!(matches!(
        collection.delete_one(&missing),
        Err(CollectionError::NotFound { .. })
    ));
    assert_eq!(collection.len(), 1);
}

#[rstest]
fn request_delete_commits_only_after_the_delay(mut collection: TestCollection) {
    let id = add_run(&mut collection, 5.0);
    let start = Instant::now();

    let ticket = collection.request_delete(&id, start).expect("request");
    assert_eq!(collection.request_delete(&id, start + Duration::from_millis(500)), Ok(ticket));
    assert_eq!(collection.view().pending(), &[id.clone()]);
    assert_eq!(collection.next_delete_due(), Some(start + DELAY));

    assert!(collection.run_due_deletes(start + Duration::from_millis(1199)).is_empty());
    assert_eq!(collection.len(), 1);
    collection.begin_edit(&id).expect("still editable while pending");
    collection.cancel_edit();

    assert_eq!(collection.run_due_deletes(start + DELAY), vec![id]);
    assert!(collection.is_empty());
    assert_eq!(collection.next_delete_due(), None);
}

#[rstest]
fn cancelled_delete_never_runs(mut collection: TestCollection) {
    let id = add_run(&mut collection, 5.0);
    let start = Instant::now();
    let ticket = collection.request_delete(&id, start).expect("request");

    assert!(collection.cancel_delete(ticket));
    assert!(!collection.cancel_delete(ticket));
    assert!(collection.view().pending().is_empty());
    assert!(collection.run_due_deletes(start + DELAY * 2).is_empty());
    assert_eq!(collection.len(), 1);
}

#[rstest]
fn scheduled_delete_of_vanished_workout_is_a_no_op(mut collection: TestCollection) {
    let first = add_run(&mut collection, 5.0);
    add_run(&mut collection, 6.0);
    let start = Instant::now();
    collection.request_delete(&first, start).expect("request");

    collection.delete_one(&first).expect("delete right away");
    assert!(collection.run_due_deletes(start + DELAY).is_empty());
    assert_eq!(collection.len(), 1);
}

#[rstest]
fn request_delete_of_unknown_id_is_not_found(mut collection: TestCollection) {
    let missing = WorkoutId::new("missing").expect("id");
    assert!(matches!(
        collection.request_delete(&missing, Instant::now()),
        Err(CollectionError::NotFound { .. })
    ));
}

#[rstest]
fn delete_all_empties_collection_store_and_view(mut collection: TestCollection) {
    add_run(&mut collection, 5.0);
    add_ride(&mut collection, 20.0);
    add_run(&mut collection, 7.0);
    collection.cycle_filter();

    assert_eq!(collection.delete_all(), 3);
    assert!(collection.is_empty());
    assert!(collection.archive().load().is_empty());
    assert_eq!(collection.view().marker_count(), 0);
    assert!(collection.view().entries().is_empty());
}

#[rstest]
fn delete_all_on_empty_collection_is_a_no_op(mut collection: TestCollection) {
    collection.view_mut().clear_calls();
    assert_eq!(collection.delete_all(), 0);
    assert!(collection.view().calls().is_empty());
    assert_eq!(collection.archive().backend().get(WORKOUTS_KEY).unwrap(), None);
}

#[rstest]
fn sort_alternates_direction_per_field(mut collection: TestCollection) {
    for distance in [5.0, 1.0, 3.0] {
        add_run(&mut collection, distance);
    }

    assert_eq!(collection.sort(SortField::Distance), SortDirection::Ascending);
    assert_eq!(displayed_distances(&collection), vec![1.0, 3.0, 5.0]);
    assert_eq!(collection.sort(SortField::Distance), SortDirection::Descending);
    assert_eq!(displayed_distances(&collection), vec![5.0, 3.0, 1.0]);
    assert_eq!(collection.sort(SortField::Distance), SortDirection::Ascending);
    assert_eq!(displayed_distances(&collection), vec![1.0, 3.0, 5.0]);

    let canonical = collection.workouts().iter().map(|w| w.distance()).collect::<Vec<_>>();
    assert_eq!(canonical, vec![5.0, 1.0, 3.0]);
    let stored = collection.archive().load().iter().map(|w| w.distance()).collect::<Vec<_>>();
    assert_eq!(stored, vec![5.0, 1.0, 3.0]);
}

#[rstest]
fn sort_is_stable_for_equal_keys(mut collection: TestCollection) {
    let a = add(&mut collection, WorkoutInput::running(5.0, 30.0, 170.0));
    let b = add(&mut collection, WorkoutInput::running(8.0, 30.0, 170.0));
    let c = add(&mut collection, WorkoutInput::running(2.0, 10.0, 170.0));

    collection.sort(SortField::Duration);
    assert_eq!(collection.displayed(), &[c.clone(), a.clone(), b.clone()]);
    collection.sort(SortField::Duration);
    assert_eq!(collection.displayed(), &[a, b, c]);
}

#[rstest]
fn sort_only_reorders_the_visible_subset(mut collection: TestCollection) {
    add_run(&mut collection, 9.0);
    add_ride(&mut collection, 40.0);
    add_run(&mut collection, 2.0);
    collection.cycle_filter();

    collection.sort(SortField::Distance);
    assert_eq!(displayed_distances(&collection), vec![2.0, 9.0]);
    assert_eq!(collection.view().entries().len(), 2);
}

#[rstest]
fn cycle_filter_keeps_markers_in_step_and_wraps(mut collection: TestCollection) {
    add_run(&mut collection, 5.0);
    add_ride(&mut collection, 20.0);
    add_ride(&mut collection, 30.0);
    let unfiltered = collection.view().entry_ids().into_iter().map(str::to_owned).collect::<Vec<_>>();

    assert_eq!(collection.cycle_filter(), Filter::Running);
    assert_markers_match_filter(&collection);
    assert_eq!(collection.view().entries().len(), 1);

    assert_eq!(collection.cycle_filter(), Filter::Cycling);
    assert_markers_match_filter(&collection);
    assert_eq!(collection.view().entries().len(), 2);

    assert_eq!(collection.cycle_filter(), Filter::All);
    assert_markers_match_filter(&collection);
    assert_eq!(collection.view().entry_ids(), unfiltered);
}

#[rstest]
fn controls_follow_collection_size_and_state(mut collection: TestCollection) {
    add_run(&mut collection, 5.0);
    let controls = *collection.view().controls().expect("controls pushed");
    assert!(!controls.delete_all_visible);
    assert!(!controls.sort_visible);

    add_ride(&mut collection, 20.0);
    collection.sort(SortField::Duration);
    collection.cycle_filter();
    let controls = *collection.view().controls().expect("controls pushed");
    assert!(controls.delete_all_visible);
    assert!(controls.sort_visible);
    assert_eq!(controls.filter, Filter::Running);
    assert_eq!(controls.duration_sort, Some(SortDirection::Ascending));
    assert_eq!(controls.distance_sort, None);
}

#[rstest]
fn focus_workout_moves_the_view(mut collection: TestCollection) {
    let id = add_run(&mut collection, 5.0);
    assert_eq!(collection.focus_workout(&id), Ok(spot()));
    assert_eq!(collection.view().calls().last(), Some(&ViewCall::FocusView(spot())));
}

#[test]
fn load_hydrates_and_renders_visible_workouts() {
    let mut archive = WorkoutArchive::new(MemoryStore::new());
    archive.save(&fixtures::mixed_week());

    let mut collection = collection_over(archive.into_backend());
    assert_eq!(collection.load(), 4);
    assert_eq!(collection.view().entry_ids(), vec!["1", "2", "3", "4"]);
    assert_markers_match_filter(&collection);
}

#[test]
fn load_of_malformed_store_starts_empty() {
    let mut store = MemoryStore::new();
    store.set(WORKOUTS_KEY, "[{\"broken\": true").expect("seed");
    let mut collection = collection_over(store);
    assert_eq!(collection.load(), 0);
    assert!(collection.view().entries().is_empty());
}

#[test]
fn reload_after_delete_no_longer_has_the_workout() {
    let mut first = collection_over(MemoryStore::new());
    let a = add_run(&mut first, 5.0);
    let b = add_run(&mut first, 6.0);
    first.delete_one(&a).expect("delete");

    let store = first.archive().backend().clone();
    let mut second = collection_over(store);
    assert_eq!(second.load(), 1);
    assert!(second.get(&a).is_none());
    assert!(second.get(&b).is_some());
}

#[test]
fn persistence_failures_do_not_block_mutations() {
    let mut store = MemoryStore::new();
    store.set_reject_writes(true);
    let mut collection = collection_over(store);

    let id = add_run(&mut collection, 5.0);
    assert_eq!(collection.len(), 1);
    collection.delete_one(&id).expect("delete");
    assert!(collection.is_empty());
}

#[rstest]
fn reset_clears_the_stored_key(mut collection: TestCollection) {
    add_run(&mut collection, 5.0);
    add_ride(&mut collection, 20.0);

    collection.reset();
    assert!(collection.is_empty());
    assert_eq!(collection.view().marker_count(), 0);
    assert_eq!(collection.archive().backend().get(WORKOUTS_KEY).unwrap(), None);
}
