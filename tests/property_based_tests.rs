mod common;

use common::*;
use dnd_registry::config::RegistryConfig;
use dnd_registry::registry::TypeValue;
use dnd_registry::{HandlerId, HandlerRegistry, HandlerType, NotificationQueue, Role, TypeTag};
use proptest::prelude::*;
use std::collections::HashSet;

fn registry() -> HandlerRegistry {
    HandlerRegistry::from_parts(&RegistryConfig::default(), NotificationQueue::disabled())
}

fn register(registry: &HandlerRegistry, role: Role, index: u64) -> HandlerId {
    match role {
        Role::Source => registry.add_source("card", CardSource::shared(index)).unwrap(),
        Role::Target => registry.add_target("card", DeckTarget::shared()).unwrap(),
    }
}

proptest! {
    /// Property: ids are unique whatever the role interleaving
    #[test]
    fn ids_are_unique_across_roles(roles in registration_sequence_strategy()) {
        let registry = registry();
        let mut seen = HashSet::new();

        for (index, role) in roles.iter().enumerate() {
            let id = register(&registry, *role, index as u64);
            prop_assert!(seen.insert(id.clone()), "id {} handed out twice", id);
        }
    }

    /// Property: removal never frees an id for reuse
    #[test]
    fn removed_ids_are_never_reissued(roles in registration_sequence_strategy()) {
        let registry = registry();
        let mut seen = HashSet::new();

        for (index, role) in roles.iter().enumerate() {
            let id = register(&registry, *role, index as u64);
            match role {
                Role::Source => registry.remove_source(&id).unwrap(),
                Role::Target => registry.remove_target(&id).unwrap(),
            }
            prop_assert!(seen.insert(id));
        }
        prop_assert_eq!(registry.stats().sources + registry.stats().targets, 0);
    }

    /// Property: the id encodes exactly the role it was registered under
    #[test]
    fn ids_round_trip_their_role(roles in registration_sequence_strategy()) {
        let registry = registry();

        for (index, role) in roles.iter().enumerate() {
            let id = register(&registry, *role, index as u64);
            prop_assert_eq!(id.role().unwrap(), *role);
            prop_assert_eq!(registry.is_source_id(&id), *role == Role::Source);
            prop_assert_eq!(registry.is_target_id(&id), *role == Role::Target);
        }
    }

    /// Property: ids are ordered by registration time regardless of role
    #[test]
    fn ids_follow_registration_order(roles in registration_sequence_strategy()) {
        let registry = registry();

        for (index, role) in roles.iter().enumerate() {
            let id = register(&registry, *role, index as u64);
            prop_assert_eq!(&id.as_str()[1..], index.to_string());
        }
    }

    /// Property: target tag sequences come back exactly as given
    #[test]
    fn target_types_keep_order_and_duplicates(names in type_names_strategy()) {
        let registry = registry();

        let id = registry.add_target(names.clone(), DeckTarget::shared()).unwrap();

        let expected: Vec<TypeTag> = names.into_iter().map(TypeTag::from).collect();
        prop_assert_eq!(registry.get_target_type(&id).unwrap(), Some(HandlerType::Many(expected)));
    }

    /// Property: a source registered under a tag reports that tag until removed
    #[test]
    fn source_type_is_stable_until_removal(name in type_name_strategy()) {
        let registry = registry();

        let id = registry.add_source(name.clone(), CardSource::shared(1)).unwrap();
        prop_assert_eq!(registry.get_source_type(&id).unwrap(), Some(TypeTag::from(name)));

        registry.remove_source(&id).unwrap();
        prop_assert_eq!(registry.get_source_type(&id).unwrap(), None::<TypeTag>);
    }

    /// Property: strings outside the prefix scheme are never role-shaped
    #[test]
    fn foreign_ids_have_no_role(raw in foreign_id_strategy()) {
        let registry = registry();
        let id = HandlerId::from(raw);

        prop_assert!(!registry.is_source_id(&id));
        prop_assert!(!registry.is_target_id(&id));
        prop_assert!(registry.get_source(&id, true).is_err());
        prop_assert!(registry.get_target(&id).is_err());
    }
}

#[test]
fn nested_target_sequences_are_rejected() {
    let registry = registry();

    let nested = TypeValue::Seq(vec![TypeValue::from("a"), TypeValue::from(vec!["b"])]);

    assert!(registry.add_target(nested, DeckTarget::shared()).is_err());
    assert_eq!(registry.stats().targets, 0);
}
