use dnd_registry::Role;
use proptest::prelude::*;

/// Strategy for generating role interleavings
pub fn role_strategy() -> impl Strategy<Value = Role> {
    prop_oneof![Just(Role::Source), Just(Role::Target)]
}

/// Strategy for generating registration sequences
pub fn registration_sequence_strategy() -> impl Strategy<Value = Vec<Role>> {
    prop::collection::vec(role_strategy(), 1..64)
}

/// Strategy for generating type tag names
pub fn type_name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,15}"
}

/// Strategy for generating target tag lists (order and duplicates kept)
pub fn type_names_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(type_name_strategy(), 0..6)
}

/// Strategy for generating strings that are not registry ids
pub fn foreign_id_strategy() -> impl Strategy<Value = String> {
    "[a-zA-RU-Z0-9][A-Za-z0-9]{0,8}"
}
