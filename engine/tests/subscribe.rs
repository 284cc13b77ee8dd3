use std::cell::RefCell;
use std::rc::Rc;

use sheet_engine::{Ability, CharacterStore};

#[test]
fn watcher_fires_only_when_its_projection_changes() {
    let mut store = CharacterStore::new();
    let seen: Rc<RefCell<Vec<i32>>> = Rc::new(RefCell::new(Vec::new()));

    let sink = Rc::clone(&seen);
    store.subscribe(
        |character| character.combat_stats.current_hp,
        move |hp| sink.borrow_mut().push(*hp),
    );

    store.modify_hp(-3);
    store.set_temporary_hp(5); // different slice; watcher stays quiet
    store.modify_hp(-1);
    store.modify_hp(0); // no change in the projection

    assert_eq!(*seen.borrow(), vec![7, 6]);
}

#[test]
fn watcher_sees_structured_projections() {
    let mut store = CharacterStore::new();
    let seen: Rc<RefCell<Vec<(String, i32)>>> = Rc::new(RefCell::new(Vec::new()));

    let sink = Rc::clone(&seen);
    store.subscribe(
        |character| (character.name.clone(), character.level),
        move |basics| sink.borrow_mut().push(basics.clone()),
    );

    store.update_level(2);
    store.modify_hp(-2); // name and level unchanged

    assert_eq!(*seen.borrow(), vec![("New Character".to_string(), 2)]);
}

#[test]
fn unsubscribed_watchers_stay_silent() {
    let mut store = CharacterStore::new();
    let count = Rc::new(RefCell::new(0u32));

    let sink = Rc::clone(&count);
    let subscription = store.subscribe(
        |character| character.level,
        move |_| *sink.borrow_mut() += 1,
    );

    store.update_level(2);
    assert_eq!(*count.borrow(), 1);

    store.unsubscribe(subscription);
    store.update_level(3);
    assert_eq!(*count.borrow(), 1);
}

#[test]
fn multiple_watchers_observe_their_own_slices() {
    let mut store = CharacterStore::new();
    let hp_events = Rc::new(RefCell::new(0u32));
    let str_events = Rc::new(RefCell::new(0u32));

    let hp_sink = Rc::clone(&hp_events);
    store.subscribe(
        |character| character.combat_stats.current_hp,
        move |_| *hp_sink.borrow_mut() += 1,
    );
    let str_sink = Rc::clone(&str_events);
    store.subscribe(
        |character| character.ability_scores.strength,
        move |_| *str_sink.borrow_mut() += 1,
    );

    store.modify_hp(-1);
    store.set_ability_score(Ability::Strength, 12);
    store.set_ability_score(Ability::Strength, 12); // same value, no event

    assert_eq!(*hp_events.borrow(), 1);
    assert_eq!(*str_events.borrow(), 1);
}
