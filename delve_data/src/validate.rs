use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::*;

/// Validation error for malformed or missing references in a `WorldDef`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    DuplicateId { kind: EntityKind, id: Id },
    WrongNamespace { expected: EntityKind, id: Id },
    MissingReference { kind: EntityKind, id: Id, context: String },
    KindMismatch { id: Id, tagged: ObjectKind, band: ObjectKind },
    InvalidValue { context: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::DuplicateId { kind, id } => {
                write!(f, "duplicate {kind} id {id}")
            },
            ValidationError::WrongNamespace { expected, id } => {
                write!(f, "id {id} is not in the {expected} namespace")
            },
            ValidationError::MissingReference { kind, id, context } => {
                write!(f, "missing {kind} {id} ({context})")
            },
            ValidationError::KindMismatch { id, tagged, band } => {
                write!(f, "object {id} is tagged '{tagged}' but its id band says '{band}'")
            },
            ValidationError::InvalidValue { context } => {
                write!(f, "invalid value ({context})")
            },
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate id namespaces, cross-references and basic invariants in a `WorldDef`.
///
/// Links share the enemy namespace, so link and enemy ids are tracked separately.
///
/// ```
/// use delve_data::{Light, SpaceDef, WorldDef, validate_world};
///
/// let world = WorldDef {
///     spaces: vec![SpaceDef {
///         id: 11,
///         name: "Start".into(),
///         description: "A room.".into(),
///         long_description: "A plain room.".into(),
///         light: Light::Bright,
///         tile: vec![String::new(); 5],
///     }],
///     ..WorldDef::default()
/// };
/// assert!(validate_world(&world).is_empty());
/// ```
pub fn validate_world(world: &WorldDef) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let mut spaces = HashSet::new();
    let mut objects = HashSet::new();
    let mut players = HashSet::new();
    let mut enemies = HashSet::new();
    let mut links = HashSet::new();

    track_ids(EntityKind::Space, world.spaces.iter().map(|s| s.id), &mut spaces, &mut errors);
    track_ids(EntityKind::Object, world.objects.iter().map(|o| o.id), &mut objects, &mut errors);
    track_ids(EntityKind::Player, world.players.iter().map(|p| p.id), &mut players, &mut errors);
    track_ids(EntityKind::Enemy, world.enemies.iter().map(|e| e.id), &mut enemies, &mut errors);
    track_ids(EntityKind::Enemy, world.links.iter().map(|l| l.id), &mut links, &mut errors);

    for space in &world.spaces {
        if space.tile.len() != TILE_ROWS {
            errors.push(ValidationError::InvalidValue {
                context: format!("space {} has {} tile rows", space.id, space.tile.len()),
            });
        }
    }

    for object in &world.objects {
        if let Some(tagged) = object.kind {
            let band = ObjectKind::from_band(object.id);
            if tagged != band {
                errors.push(ValidationError::KindMismatch {
                    id: object.id,
                    tagged,
                    band,
                });
            }
        }
        check_optional_ref(
            EntityKind::Space,
            object.location,
            &spaces,
            format!("object {} location", object.id),
            &mut errors,
        );
        check_optional_ref(
            EntityKind::Object,
            object.dependency,
            &objects,
            format!("object {} dependency", object.id),
            &mut errors,
        );
        if is_valid_id(object.opens) && !links.contains(&object.opens) && !spaces.contains(&object.opens) {
            errors.push(ValidationError::MissingReference {
                kind: EntityKind::Enemy,
                id: object.opens,
                context: format!("object {} opens", object.id),
            });
        }
    }

    for player in &world.players {
        check_optional_ref(
            EntityKind::Space,
            player.location,
            &spaces,
            format!("player {} location", player.id),
            &mut errors,
        );
        if player.health > player.max_health {
            errors.push(ValidationError::InvalidValue {
                context: format!(
                    "player {} health {} exceeds max health {}",
                    player.id, player.health, player.max_health
                ),
            });
        }
        check_crit(player.crit, &format!("player {}", player.id), &mut errors);
    }

    for enemy in &world.enemies {
        check_optional_ref(
            EntityKind::Space,
            enemy.location,
            &spaces,
            format!("enemy {} location", enemy.id),
            &mut errors,
        );
        check_crit(enemy.crit, &format!("enemy {}", enemy.id), &mut errors);
    }

    for link in &world.links {
        check_ref(
            EntityKind::Space,
            link.origin,
            &spaces,
            format!("link {} origin", link.id),
            &mut errors,
        );
        check_ref(
            EntityKind::Space,
            link.destination,
            &spaces,
            format!("link {} destination", link.id),
            &mut errors,
        );
    }

    let mut held = HashSet::new();
    let mut per_player: HashMap<Id, usize> = HashMap::new();
    for entry in &world.inventory {
        check_ref(
            EntityKind::Player,
            entry.player,
            &players,
            format!("inventory of player {}", entry.player),
            &mut errors,
        );
        check_ref(
            EntityKind::Object,
            entry.object,
            &objects,
            format!("inventory of player {}", entry.player),
            &mut errors,
        );
        if !held.insert(entry.object) {
            errors.push(ValidationError::InvalidValue {
                context: format!("object {} is held more than once", entry.object),
            });
        }
        *per_player.entry(entry.player).or_default() += 1;
    }
    for player in &world.players {
        let count = per_player.get(&player.id).copied().unwrap_or(0);
        if count > player.capacity {
            errors.push(ValidationError::InvalidValue {
                context: format!(
                    "player {} holds {count} objects but capacity is {}",
                    player.id, player.capacity
                ),
            });
        }
    }

    errors
}

fn track_ids(
    kind: EntityKind,
    ids: impl Iterator<Item = Id>,
    set: &mut HashSet<Id>,
    errors: &mut Vec<ValidationError>,
) {
    for id in ids {
        if classify(id) != Some(kind) {
            errors.push(ValidationError::WrongNamespace { expected: kind, id });
        }
        if !set.insert(id) {
            errors.push(ValidationError::DuplicateId { kind, id });
        }
    }
}

fn check_ref(kind: EntityKind, id: Id, set: &HashSet<Id>, context: String, errors: &mut Vec<ValidationError>) {
    if !set.contains(&id) {
        errors.push(ValidationError::MissingReference { kind, id, context });
    }
}

/// Like [`check_ref`], but `NO_ID` (or any non-positive id) is accepted.
fn check_optional_ref(kind: EntityKind, id: Id, set: &HashSet<Id>, context: String, errors: &mut Vec<ValidationError>) {
    if is_valid_id(id) {
        check_ref(kind, id, set, context, errors);
    }
}

fn check_crit(crit: u8, who: &str, errors: &mut Vec<ValidationError>) {
    if crit > 10 {
        errors.push(ValidationError::InvalidValue {
            context: format!("{who} crit {crit} is outside 0-10"),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn space(id: Id) -> SpaceDef {
        SpaceDef {
            id,
            name: format!("Space {id}"),
            description: "Test space".into(),
            long_description: "A test space.".into(),
            light: Light::Bright,
            tile: vec![String::new(); TILE_ROWS],
        }
    }

    fn object(id: Id, location: Id) -> ObjectDef {
        ObjectDef {
            id,
            name: format!("object{id}"),
            description: "Test object".into(),
            location,
            movable: true,
            dependency: NO_ID,
            opens: NO_ID,
            illuminate: false,
            turned_on: false,
            visible_in: Light::Bright,
            kind: None,
        }
    }

    fn player(capacity: usize) -> PlayerDef {
        PlayerDef {
            id: 21,
            name: "Ant".into(),
            location: 11,
            health: 3,
            capacity,
            max_health: 5,
            damage: 1,
            crit: 0,
        }
    }

    fn base_world() -> WorldDef {
        WorldDef {
            spaces: vec![space(11), space(12)],
            players: vec![player(2)],
            links: vec![LinkDef {
                id: 41,
                name: "door".into(),
                origin: 11,
                destination: 12,
                direction: Direction::North,
                status: LinkStatus::Closed,
            }],
            ..WorldDef::default()
        }
    }

    #[test]
    fn base_world_is_valid() {
        assert!(validate_world(&base_world()).is_empty());
    }

    #[test]
    fn duplicate_ids_are_reported() {
        let mut world = base_world();
        world.spaces.push(space(11));

        let errors = validate_world(&world);
        assert!(errors.contains(&ValidationError::DuplicateId {
            kind: EntityKind::Space,
            id: 11
        }));
    }

    #[test]
    fn ids_outside_their_namespace_are_reported() {
        let mut world = base_world();
        world.objects.push(object(21, 11));

        let errors = validate_world(&world);
        assert!(errors.contains(&ValidationError::WrongNamespace {
            expected: EntityKind::Object,
            id: 21
        }));
    }

    #[test]
    fn link_and_enemy_may_share_an_id() {
        let mut world = base_world();
        world.enemies.push(EnemyDef {
            id: 41,
            name: "Spider".into(),
            location: 12,
            health: 3,
            damage: 1,
            crit: 0,
        });
        assert!(validate_world(&world).is_empty());
    }

    #[test]
    fn kind_tag_must_match_band() {
        let mut world = base_world();
        let mut apple = object(301, 11);
        apple.kind = Some(ObjectKind::Key);
        world.objects.push(apple);

        let errors = validate_world(&world);
        assert!(errors.contains(&ValidationError::KindMismatch {
            id: 301,
            tagged: ObjectKind::Key,
            band: ObjectKind::Apple
        }));
    }

    #[test]
    fn missing_references_are_reported() {
        let mut world = base_world();
        world.objects.push(object(301, 19));
        world.links[0].destination = 18;

        let errors = validate_world(&world);
        assert!(errors.iter().any(
            |err| matches!(err, ValidationError::MissingReference { kind: EntityKind::Space, id: 19, .. })
        ));
        assert!(errors.iter().any(
            |err| matches!(err, ValidationError::MissingReference { kind: EntityKind::Space, id: 18, .. })
        ));
    }

    #[test]
    fn inventory_over_capacity_is_reported() {
        let mut world = base_world();
        world.players[0].capacity = 1;
        world.objects = vec![object(301, NO_ID), object(302, NO_ID)];
        world.inventory = vec![
            InventoryDef { player: 21, object: 301 },
            InventoryDef { player: 21, object: 302 },
        ];

        let errors = validate_world(&world);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].to_string().contains("capacity is 1"));
    }
}
