use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tempfile::tempdir;

use unitype_core::bank::{Axis, Item, Pole, QuestionBank};
use unitype_core::session::{FileStorage, KeyValueStorage, MemoryStorage, SessionState, SessionStore};
use unitype_core::Quiz;

const KEY: &str = "unitype16_mvp_storage_v1";

fn bank_of(n: usize) -> Arc<QuestionBank> {
    let items = (0..n)
        .map(|i| {
            let axis = Axis::ALL[i % 4];
            let pole = if i % 2 == 0 { Pole::R } else { Pole::L };
            Item::new(format!("item-{}", i), axis, pole)
        })
        .collect();
    Arc::new(QuestionBank::new(items).unwrap())
}

#[test]
fn test_round_trip_through_file_storage() {
    let temp_dir = tempdir().unwrap();
    let bank = QuestionBank::builtin();
    let store = SessionStore::new(FileStorage::new(temp_dir.path()), KEY, bank.clone());

    let mut state = SessionState::fresh(&bank, &mut StdRng::seed_from_u64(3));
    for id in state.item_order.iter().take(7) {
        state.responses.insert(id.clone(), 5);
    }
    state.current_step = 1;
    state.has_started = true;

    store.save(&state);

    // A second store over the same directory stands in for a page reload
    let reloaded = SessionStore::new(FileStorage::new(temp_dir.path()), KEY, bank);
    assert_eq!(reloaded.load(), Some(state));
}

#[test]
fn test_bank_growth_discards_saved_session() {
    let storage = Arc::new(MemoryStorage::new());
    let old_bank = bank_of(8);
    let old_store = SessionStore::new(storage.clone(), KEY, old_bank.clone());
    old_store.save(&SessionState::fresh(&old_bank, &mut StdRng::seed_from_u64(4)));

    let new_store = SessionStore::new(storage, KEY, bank_of(9));
    assert!(new_store.try_load().is_err());
    assert_eq!(new_store.load(), None);
}

#[test]
fn test_quiz_resumes_where_it_left_off() {
    let storage = Arc::new(MemoryStorage::new());
    let bank = bank_of(8);

    let order = {
        let store = SessionStore::new(storage.clone(), KEY, bank.clone());
        let mut quiz = Quiz::resume(store, StdRng::seed_from_u64(5), 4);
        quiz.start();
        let ids: Vec<String> = quiz.current_items().iter().map(|i| i.id.clone()).collect();
        for id in &ids {
            quiz.answer(id, 1).unwrap();
        }
        quiz.next().unwrap();
        quiz.state().item_order.clone()
    };

    // Different seed: a fresh shuffle would almost surely differ
    let store = SessionStore::new(storage, KEY, bank);
    let quiz = Quiz::resume(store, StdRng::seed_from_u64(999), 4);
    assert_eq!(quiz.state().item_order, order);
    assert_eq!(quiz.current_step(), 1);
    assert!(quiz.state().has_started);
    assert_eq!(quiz.progress().answered, 4);
}

#[test]
fn test_corrupt_record_starts_fresh_session() {
    let storage = Arc::new(MemoryStorage::new());
    let bank = bank_of(8);
    let store = SessionStore::new(storage.clone(), KEY, bank.clone());
    store.backend().set(KEY, "\u{0}garbage").unwrap();

    let quiz = Quiz::resume(store, StdRng::seed_from_u64(6), 4);
    assert!(quiz.state().responses.is_empty());
    assert_eq!(quiz.state().item_order.len(), 8);

    // The fresh session is written back immediately
    let check = SessionStore::new(storage, KEY, bank);
    assert_eq!(check.load().as_ref(), Some(quiz.state()));
}

#[test]
fn test_out_of_range_step_is_clamped() {
    let storage = Arc::new(MemoryStorage::new());
    let bank = bank_of(8);
    let store = SessionStore::new(storage.clone(), KEY, bank.clone());

    let mut state = SessionState::with_order(bank.ids());
    state.current_step = 40;
    store.save(&state);

    let quiz = Quiz::resume(SessionStore::new(storage, KEY, bank), StdRng::seed_from_u64(7), 4);
    assert_eq!(quiz.current_step(), 1);
}

#[test]
fn test_reset_sequence() {
    let storage = Arc::new(MemoryStorage::new());
    let bank = bank_of(8);
    let store = SessionStore::new(storage.clone(), KEY, bank.clone());
    let mut quiz = Quiz::resume(store, StdRng::seed_from_u64(8), 4);

    quiz.start();
    for id in quiz.state().item_order.clone() {
        quiz.answer(&id, 6).unwrap();
    }
    quiz.next().unwrap();
    quiz.finish().unwrap();

    quiz.reset();
    assert!(quiz.state().responses.is_empty());
    assert_eq!(quiz.current_step(), 0);
    assert!(!quiz.state().is_complete);

    let check = SessionStore::new(storage, KEY, bank);
    let persisted = check.load().unwrap();
    assert!(persisted.responses.is_empty());
    assert_eq!(persisted.current_step, 0);
}
