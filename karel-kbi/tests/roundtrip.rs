//! Encode/decode round trips over generated and legacy worlds

use karel_kbi::{
    KbiError, MDO_MAGIC, WordWidth, WordWidths, decode_kbi, encode_kbi, read_mdo_kec,
    words_from_le_bytes,
};
use karel_world::{
    DEFAULT_PROGRAM_NAME, DEFAULT_WORLD_NAME, Direction, DumpKind, Limit, Limits, Quantity,
    TargetVersion, World,
};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

fn roundtrip(world: &World) -> World {
    let bytes = encode_kbi(world).unwrap();
    let mut decoded = World::default();
    decode_kbi(&mut decoded, &bytes).unwrap();
    decoded
}

fn random_quantity(rng: &mut Pcg32, max: u32) -> Quantity {
    if rng.random_bool(0.1) {
        Quantity::Infinite
    } else {
        Quantity::Finite(rng.random_range(0..=max))
    }
}

fn random_name(rng: &mut Pcg32, prefix: &str) -> String {
    format!("{prefix}_{}", rng.random_range(0..1000))
}

/// A world with every field populated from `rng`
fn random_world(rng: &mut Pcg32) -> World {
    let w = rng.random_range(1..=12);
    let h = rng.random_range(1..=12);
    let mut world = World::new(w, h);

    for _ in 0..rng.random_range(0..=w * h) {
        let (i, j) = (rng.random_range(1..=h), rng.random_range(1..=w));
        match rng.random_range(0..3) {
            0 => {
                let direction = Direction::ALL[rng.random_range(0..4)];
                world.add_wall(i, j, direction);
            }
            1 => world.set_buzzers(i, j, random_quantity(rng, 600)),
            _ => world.set_dump_cell(i, j, true),
        }
    }

    world.move_to(rng.random_range(1..=h), rng.random_range(1..=w));
    world.rotate(Direction::ALL[rng.random_range(0..4)]);
    world.set_bag_buzzers(random_quantity(rng, 100_000));
    for kind in DumpKind::ALL {
        world.set_dump(kind, rng.random_bool(0.3));
    }

    let mut limits = world.limits.to_array();
    for limit in &mut limits {
        if rng.random_bool(0.5) {
            *limit = Limit::Max(rng.random_range(0..u32::MAX));
        }
    }
    world.limits = Limits::from_array(limits);

    if rng.random_bool(0.5) {
        world.world_name = random_name(rng, "mundo");
    }
    if rng.random_bool(0.5) {
        world.program_name = random_name(rng, "prog");
    }
    if rng.random_bool(0.5) {
        world.target_version = TargetVersion::V1_0;
    }
    world
}

#[test]
fn test_random_worlds_roundtrip() {
    let mut rng = Pcg32::seed_from_u64(0x4b57);
    for n in 0..300 {
        let world = random_world(&mut rng);
        assert_eq!(roundtrip(&world), world, "world #{n}");
    }
}

#[test]
fn test_header_carries_minimal_widths() {
    let mut rng = Pcg32::seed_from_u64(7);
    for _ in 0..50 {
        let world = random_world(&mut rng);
        let bytes = encode_kbi(&world).unwrap();
        assert_eq!(bytes[3], WordWidths::for_world(&world).pack());
    }

    // Width - 1 decides A
    assert_eq!(WordWidths::for_world(&World::new(256, 1)).a, WordWidth::U8);
    assert_eq!(WordWidths::for_world(&World::new(257, 1)).a, WordWidth::U16);
    assert_eq!(WordWidths::for_world(&World::new(1, 65_537)).a, WordWidth::U32);
}

#[test]
fn test_wide_world_roundtrip() {
    let mut world = World::new(70_000, 1);
    world.set_buzzers(1, 70_000, Quantity::Finite(70_000));
    world.set_buzzers(1, 1, Quantity::Infinite);
    world.add_wall(1, 35_000, Direction::East);
    world.move_to(1, 69_999);

    let bytes = encode_kbi(&world).unwrap();
    let widths = WordWidths::for_world(&world);
    assert_eq!(widths.a, WordWidth::U32);
    assert_eq!(widths.b, WordWidth::U32);
    assert_eq!(widths.c, WordWidth::U32);
    assert_eq!(bytes[3], 0);

    assert_eq!(roundtrip(&world), world);
}

#[test]
fn test_medium_world_roundtrip() {
    let mut world = World::new(300, 300);
    world.set_buzzers(300, 300, Quantity::Finite(1_000));
    world.set_dump_cell(150, 1, true);
    world.add_wall(299, 12, Direction::South);

    let widths = WordWidths::for_world(&world);
    assert_eq!(widths.a, WordWidth::U16);
    assert_eq!(widths.b, WordWidth::U16);
    assert_eq!(widths.c, WordWidth::U32);

    assert_eq!(roundtrip(&world), world);
}

#[test]
fn test_largest_count_stays_clear_of_sentinel() {
    let mut world = World::new(2, 1);
    world.set_buzzers(1, 1, Quantity::Finite(254));
    world.set_buzzers(1, 2, Quantity::Infinite);
    assert_eq!(WordWidths::for_world(&world).b, WordWidth::U8);
    assert_eq!(roundtrip(&world), world);

    world.set_buzzers(1, 1, Quantity::Finite(255));
    assert_eq!(WordWidths::for_world(&world).b, WordWidth::U16);
    let decoded = roundtrip(&world);
    assert_eq!(decoded.start_buzzers(1, 1), Quantity::Finite(255));
    assert_eq!(decoded.start_buzzers(1, 2), Quantity::Infinite);
}

#[test]
fn test_default_and_empty_names() {
    let world = World::new(2, 2);
    let decoded = roundtrip(&world);
    assert_eq!(decoded.world_name, DEFAULT_WORLD_NAME);
    assert_eq!(decoded.program_name, DEFAULT_PROGRAM_NAME);

    let mut unnamed = World::new(2, 2);
    unnamed.world_name = String::new();
    unnamed.program_name = String::new();
    assert_eq!(encode_kbi(&unnamed).unwrap(), encode_kbi(&world).unwrap());
    assert_eq!(roundtrip(&unnamed), world);
}

#[test]
fn test_non_ascii_names() {
    let mut world = World::new(3, 3);
    world.world_name = "laberinto ñandú".to_string();
    world.program_name = "programa_1 ✓".to_string();
    assert_eq!(roundtrip(&world), world);
}

#[test]
fn test_names_are_cut_at_nul() {
    let mut world = World::new(1, 1);
    world.world_name = "ab\0cd".to_string();
    assert_eq!(roundtrip(&world).world_name, "ab");
}

#[test]
fn test_every_prefix_is_truncated() {
    let mut rng = Pcg32::seed_from_u64(99);
    let mut world = random_world(&mut rng);
    world.world_name = "prefix".to_string();
    world.set_buzzers(1, 1, Quantity::Finite(3));

    let bytes = encode_kbi(&world).unwrap();
    for len in 0..bytes.len() {
        let mut target = World::default();
        assert_eq!(
            decode_kbi(&mut target, &bytes[..len]),
            Err(KbiError::UnexpectedEof),
            "prefix of {len} bytes"
        );
    }
}

#[test]
fn test_trailing_bytes_are_ignored() {
    let mut rng = Pcg32::seed_from_u64(3);
    let world = random_world(&mut rng);
    let mut bytes = encode_kbi(&world).unwrap();
    bytes.extend_from_slice(&[0xAB; 7]);

    let mut decoded = World::default();
    decode_kbi(&mut decoded, &bytes).unwrap();
    assert_eq!(decoded, world);
}

#[test]
fn test_decode_into_used_world() {
    let mut rng = Pcg32::seed_from_u64(11);
    let first = random_world(&mut rng);
    let second = random_world(&mut rng);

    let mut target = first.clone();
    decode_kbi(&mut target, &encode_kbi(&second).unwrap()).unwrap();
    assert_eq!(target, second);
}

#[test]
fn test_run_form_matches_single_entries() {
    let mut world = World::new(4, 1);
    world.limits = Limits::from_array([Limit::Unlimited; 8]);
    for j in 1..=4 {
        world.set_dump_cell(1, j, true);
    }
    world.set_buzzers(1, 2, Quantity::Finite(8));
    world.set_buzzers(1, 3, Quantity::Finite(9));

    // Same world with both lists in run form
    let mut bytes = vec![b'K', b'W', 1, 0x2A];
    bytes.extend_from_slice(&[0xFF; 32]);
    bytes.extend_from_slice(&[3, 0, 0, 1, 1]);
    bytes.extend_from_slice(&[1, 0, 1, 8, 9]);
    bytes.extend_from_slice(&[0, 0, 1, 0b100_100, 0b100_100]);
    bytes.extend_from_slice(&[0, 0, 0, 0, 0, 0, 0, 1, 0]);

    let mut decoded = World::default();
    decode_kbi(&mut decoded, &bytes).unwrap();
    assert_eq!(decoded, world);
    assert_eq!(roundtrip(&world), world);
}

#[test]
fn test_mdo_world_survives_kbi() {
    let mut bytes = Vec::new();
    let mut push = |word: u16| bytes.extend_from_slice(&word.to_le_bytes());
    for word in MDO_MAGIC {
        push(word);
    }
    // reserved, width, height, bag, x, y, orientation, walls, heaps, reserved
    for word in [0, 6, 5, 40, 3, 2, 0, 2, 2, 0] {
        push(word);
    }
    for word in [2, 2, 0b0110, 5, 1, 0b0001, 1, 1, 12, 6, 5, 0xFFFF] {
        push(word);
    }
    let mdo = words_from_le_bytes(&bytes);

    let mut world = World::default();
    read_mdo_kec(&mut world, &mdo, None).unwrap();
    assert_eq!((world.w(), world.h()), (6, 5));
    assert_eq!(world.target_version, TargetVersion::V1_0);
    assert_eq!(world.orientation(), Direction::West);
    assert_eq!(world.start_buzzers(5, 6), Quantity::Infinite);

    // Mask bit 0 on the first row is the edge shared with row 2
    assert_ne!(world.walls(1, 5) & Direction::South.bit(), 0);
    assert_ne!(world.walls(2, 5) & Direction::North.bit(), 0);
    let east_and_north = Direction::East.bit() | Direction::North.bit();
    assert_eq!(world.walls(2, 2), east_and_north);

    let decoded = roundtrip(&world);
    assert_ne!(decoded.walls(1, 5) & Direction::South.bit(), 0);
    assert_eq!(decoded, world);
}
