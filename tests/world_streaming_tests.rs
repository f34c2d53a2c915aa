use cgmath::Point3;
use voxel_world::rendering::meshing::InstanceTransform;
use voxel_world::voxels::block::{block_type::BlockType, AIR, BEDROCK, FILL};
use voxel_world::voxels::chunk::{ChunkPos, CHUNK_DIMENSION, CHUNK_HEIGHT};
use voxel_world::{World, WorldConfig};

const SEED: u32 = 9001;

fn world() -> World {
    let mut world = World::with_seed(SEED);
    world.init();
    world
}

/// Centre of chunk `(cx, cz)` at walking height.
fn standing_in(cx: i32, cz: i32) -> Point3<f32> {
    let half = CHUNK_DIMENSION as f32 / 2.0;
    Point3::new(
        (cx * CHUNK_DIMENSION) as f32 + half,
        70.0,
        (cz * CHUNK_DIMENSION) as f32 + half,
    )
}

fn assert_scene_matches_world(world: &World) {
    let scene = world.root();
    assert_eq!(scene.attached_chunk_count(), world.loaded_chunk_count());

    let mut expected_bytes = 0;
    let mut expected_primitives = 0;
    for position in world.chunk_positions() {
        assert!(scene.is_attached(position), "{position:?} not attached");
        let mesh = world.chunk(position).map(|chunk| chunk.mesh()).unwrap();
        expected_bytes += mesh.instance_count() * std::mem::size_of::<InstanceTransform>();
        expected_primitives += mesh.primitive_count();
    }
    assert_eq!(scene.allocated_bytes(), expected_bytes);
    assert_eq!(scene.live_primitive_count(), expected_primitives);
}

#[test]
fn streaming_loads_the_render_square() {
    let mut world = world();
    world.update_chunks(standing_in(0, 0));

    let distance = world.render_distance();
    let side = (2 * distance + 1) as usize;
    assert_eq!(world.loaded_chunk_count(), side * side);
    for position in world.chunk_positions() {
        assert!(position.chebyshev_distance(ChunkPos::new(0, 0)) <= distance);
    }
    assert_scene_matches_world(&world);
}

#[test]
fn streaming_keeps_a_hysteresis_band() {
    let mut world = world();
    let distance = world.render_distance();
    world.update_chunks(standing_in(0, 0));

    // One chunk east: the western column is now at distance + 1 and stays.
    world.update_chunks(standing_in(1, 0));
    let center = ChunkPos::new(1, 0);
    for dx in -distance..=distance {
        for dz in -distance..=distance {
            assert!(world.chunk(ChunkPos::new(1 + dx, dz)).is_some());
        }
    }
    assert!(world.chunk(ChunkPos::new(-distance, 0)).is_some());
    assert!(world
        .chunk_positions()
        .all(|position| position.chebyshev_distance(center) <= distance + 1));

    // Pacing back and forth across the boundary neither loads nor unloads.
    let settled = world.loaded_chunk_count();
    for _ in 0..3 {
        world.update_chunks(standing_in(0, 0));
        world.update_chunks(standing_in(1, 0));
        assert_eq!(world.loaded_chunk_count(), settled);
    }
}

#[test]
fn walking_away_and_back_leaves_no_leaks() {
    let mut world = world();
    world.update_chunks(standing_in(0, 0));
    let initial_count = world.loaded_chunk_count();

    for step in 1..=8 {
        world.update_chunks(standing_in(step, -step));
        assert_scene_matches_world(&world);
    }
    assert!(world.chunk(ChunkPos::new(0, 0)).is_none());

    for step in (0..8).rev() {
        world.update_chunks(standing_in(step, -step));
    }
    assert_scene_matches_world(&world);
    assert!(world.chunk(ChunkPos::new(0, 0)).is_some());
    assert!(world.loaded_chunk_count() >= initial_count);
}

#[test]
fn render_distance_changes_apply_on_next_update() {
    let mut world = world();
    world.set_render_distance(1);
    world.update_chunks(standing_in(0, 0));
    assert_eq!(world.loaded_chunk_count(), 9);

    world.set_render_distance(3);
    world.update_chunks(standing_in(0, 0));
    assert_eq!(world.loaded_chunk_count(), 49);

    // Shrinking keeps the hysteresis band of one chunk.
    world.set_render_distance(1);
    world.update_chunks(standing_in(0, 0));
    assert_eq!(world.loaded_chunk_count(), 25);

    world.set_render_distance(-4);
    assert_eq!(world.render_distance(), 0);
    world.update_chunks(standing_in(0, 0));
    assert_eq!(world.loaded_chunk_count(), 9);
    assert_scene_matches_world(&world);
}

#[test]
fn generating_a_loaded_chunk_changes_nothing() {
    let mut world = world();
    world.generate_chunk(2, -1);
    world.set_block(33, 120, -10, BlockType::WOOD.id());
    let before = world.chunk(ChunkPos::new(2, -1)).unwrap().blocks().to_vec();

    world.generate_chunk(2, -1);
    world.update_chunks(standing_in(2, -1));

    assert_eq!(world.chunk(ChunkPos::new(2, -1)).unwrap().blocks(), &before[..]);
    assert_eq!(world.get_block(33, 120, -10), BlockType::WOOD.id());
}

#[test]
fn same_seed_generates_the_same_chunks_in_any_order() {
    let mut streamed = world();
    streamed.update_chunks(standing_in(-3, 4));

    let mut direct = world();
    direct.generate_chunk(-2, 5);
    direct.generate_chunk(-3, 4);

    for position in [ChunkPos::new(-3, 4), ChunkPos::new(-2, 5)] {
        let a = streamed.chunk(position).unwrap();
        let b = direct.chunk(position).unwrap();
        assert_eq!(a.blocks(), b.blocks());
        assert_eq!(a.decorations(), b.decorations());
    }
}

#[test]
fn unloaded_space_reads_as_air_above_bedrock() {
    let world = world();
    assert_eq!(world.loaded_chunk_count(), 0);
    for (x, z) in [(0, 0), (-1, -1), (12_345, -67_890), (i32::MIN / 2, 7)] {
        assert_eq!(world.get_block(x, 0, z), BEDROCK);
        assert_eq!(world.get_block(x, 1, z), AIR);
        assert_eq!(world.get_block(x, 64, z), AIR);
        assert_eq!(world.get_block(x, -1, z), AIR);
        assert_eq!(world.get_block(x, CHUNK_HEIGHT, z), AIR);
    }
}

#[test]
fn bedrock_floor_under_every_loaded_column() {
    let mut world = world();
    world.update_chunks(standing_in(0, 0));
    for x in -40..40 {
        for z in [-33, -1, 0, 17, 40] {
            assert_eq!(world.get_block(x, 0, z), BEDROCK);
        }
    }
}

#[test]
fn negative_coordinates_address_the_western_chunk() {
    let mut world = world();
    world.set_block(-1, 100, -1, BlockType::CHEST.id());

    let chunk = world.chunk(ChunkPos::new(-1, -1)).unwrap();
    assert_eq!(chunk.get_block(15, 100, 15), BlockType::CHEST.id());
    assert_eq!(world.get_block(-1, 100, -1), BlockType::CHEST.id());
    assert_eq!(world.get_block(-17, 100, -1), AIR);
    assert!(world.chunk(ChunkPos::new(0, 0)).is_none());
}

#[test]
fn world_and_chunk_addressing_agree_everywhere() {
    let mut world = world();
    world.set_render_distance(3);
    world.update_chunks(standing_in(0, 0));

    for x in -40..40 {
        for z in -40..40 {
            let position = ChunkPos::from_block(x, z);
            let chunk = world.chunk(position).unwrap();
            let (local_x, local_z) = (x - position.origin().x, z - position.origin().z);
            assert!((0..CHUNK_DIMENSION).contains(&local_x) && (0..CHUNK_DIMENSION).contains(&local_z));
            for y in [1, 30, 62, 63, 64, 65, 200] {
                assert_eq!(
                    world.get_block(x, y, z),
                    chunk.get_block(local_x, y, local_z),
                    "({x}, {y}, {z})"
                );
            }
        }
    }
}

#[test]
fn writes_on_chunk_seams_land_in_the_owning_chunk() {
    let mut world = world();
    let seams = [-33, -32, -17, -16, -1, 0, 15, 16, 31, 32];
    let blocks = [BlockType::PLANKS.id(), BlockType::WOOD.id(), BlockType::LAVA.id()];

    for (i, &x) in seams.iter().enumerate() {
        for (j, &z) in seams.iter().enumerate() {
            world.set_block(x, 100, z, blocks[(i + j) % blocks.len()]);
        }
    }

    for (i, &x) in seams.iter().enumerate() {
        for (j, &z) in seams.iter().enumerate() {
            let expected = blocks[(i + j) % blocks.len()];
            let position = ChunkPos::from_block(x, z);
            let chunk = world.chunk(position).unwrap();
            assert_eq!(world.get_block(x, 100, z), expected, "world ({x}, {z})");
            assert_eq!(
                chunk.get_block(x.rem_euclid(16), 100, z.rem_euclid(16)),
                expected,
                "chunk {position:?}"
            );
            assert_eq!(world.get_block(x, 101, z), AIR);
        }
    }
    // The seam coordinates span chunks -3..=2 on each axis.
    assert_eq!(world.loaded_chunk_count(), 36);
}

#[test]
fn writes_outside_the_vertical_range_are_ignored() {
    let mut world = world();
    world.generate_chunk(0, 0);
    let before = world.chunk(ChunkPos::new(0, 0)).unwrap().blocks().to_vec();

    world.set_block(3, -1, 3, BlockType::WOOD.id());
    world.set_block(3, CHUNK_HEIGHT, 3, BlockType::WOOD.id());

    assert_eq!(world.chunk(ChunkPos::new(0, 0)).unwrap().blocks(), &before[..]);
}

#[test]
fn ores_only_replace_fill_below_the_surface() {
    let mut world = world();
    world.update_chunks(standing_in(20, -20));
    let fill_top = world.config().terrain.fill_top;

    let mut ore_cells = 0;
    for position in world.chunk_positions() {
        let chunk = world.chunk(position).unwrap();
        let origin = position.origin();
        for (local, block) in chunk.iter_blocks() {
            if !world.ores().is_ore(block) {
                continue;
            }
            ore_cells += 1;
            let height = world.terrain_height(origin.x + local.x, origin.z + local.z);
            assert!(local.y >= 1, "ore in the bedrock layer");
            assert!(local.y < height.min(fill_top), "ore at {local:?} above fill");
        }
    }
    assert!(ore_cells > 0);
}

#[test]
fn chunks_generated_before_init_carry_no_ores() {
    let mut world = World::with_seed(SEED);
    world.generate_chunk(0, 0);
    let chunk = world.chunk(ChunkPos::new(0, 0)).unwrap();
    assert!(chunk.blocks().iter().all(|block| *block < 100));
    assert!(chunk.blocks().contains(&FILL));
}

#[test]
fn invalid_configuration_is_rejected() {
    let config = WorldConfig {
        render_distance: -1,
        ..WorldConfig::default()
    };
    assert!(World::new(config).is_err());

    let world = World::new(WorldConfig {
        seed: Some(5),
        ..WorldConfig::default()
    })
    .unwrap();
    assert_eq!(world.seed(), 5);
    assert!(!world.is_initialized());
}
