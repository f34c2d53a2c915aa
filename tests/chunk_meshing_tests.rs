use std::collections::HashMap;

use cgmath::Point3;
use voxel_world::config::OreConfig;
use voxel_world::rendering::materials::{GeometryKind, MaterialCache, PaletteCatalog};
use voxel_world::rendering::meshing::{ChunkMesher, Isolated};
use voxel_world::voxels::block::{block_type::BlockType, BlockId, AIR};
use voxel_world::voxels::block::block_side::BlockSide;
use voxel_world::voxels::chunk::{
    chunk_generation::ChunkGenerator, Chunk, ChunkPos, CHUNK_DIMENSION, CHUNK_HEIGHT,
};
use voxel_world::voxels::generation::ores::OreCatalog;
use voxel_world::voxels::generation::terrain::TerrainGenerator;
use voxel_world::{World, WorldConfig};

fn world_without_neighbor_rebuilds() -> World {
    World::new(WorldConfig {
        seed: Some(3),
        rebuild_neighbors: false,
        ..WorldConfig::default()
    })
    .unwrap()
}

/// Solidity as the mesher sees it: below the world is solid, above is air.
fn solid_at(world: &World, x: i32, y: i32, z: i32) -> bool {
    if y < 0 {
        return true;
    }
    world.get_block(x, y, z) != AIR
}

#[test]
fn drawn_blocks_are_exactly_the_exposed_ones() {
    let mut world = World::with_seed(123);
    world.init();
    world.set_render_distance(1);
    world.update_chunks(Point3::new(8.0, 70.0, 8.0));

    let position = ChunkPos::new(0, 0);
    let chunk = world.chunk(position).unwrap();
    let mesh = chunk.mesh();

    for y in 0..CHUNK_HEIGHT {
        for z in 0..CHUNK_DIMENSION {
            for x in 0..CHUNK_DIMENSION {
                let block = chunk.get_block(x, y, z);
                let exposed = block != AIR
                    && BlockSide::all().iter().any(|side| {
                        let n = side.normal();
                        !solid_at(&world, x + n.x, y + n.y, z + n.z)
                    });
                assert_eq!(
                    mesh.contains(Point3::new(x, y, z)),
                    exposed,
                    "block {block} at ({x}, {y}, {z})"
                );
            }
        }
    }
}

#[test]
fn batches_are_sorted_and_homogeneous() {
    let mut world = World::with_seed(55);
    world.init();
    world.update_chunks(Point3::new(300.0, 70.0, -150.0));

    for position in world.chunk_positions() {
        let chunk = world.chunk(position).unwrap();
        let mesh = chunk.mesh();
        assert_eq!(mesh.position, position);
        assert!(mesh.batches.windows(2).all(|pair| pair[0].block < pair[1].block));
        for batch in &mesh.batches {
            assert!(!batch.is_empty());
            for cell in &batch.positions {
                assert_eq!(chunk.get_block(cell.x, cell.y, cell.z), batch.block);
            }
        }
        assert_eq!(mesh.decorations.as_slice(), chunk.decorations());
    }
}

#[test]
fn every_chunk_shares_one_material_per_block() {
    let mut world = World::with_seed(8);
    world.update_chunks(Point3::new(0.0, 70.0, 0.0));

    let grass = BlockType::GRASS.id();
    let materials: Vec<u32> = world
        .chunk_positions()
        .filter_map(|position| world.chunk(position))
        .filter_map(|chunk| chunk.mesh().batch(grass).map(|batch| batch.material))
        .collect();
    assert!(!materials.is_empty());
    assert!(materials.iter().all(|material| *material == materials[0]));
}

#[test]
fn digging_exposes_the_block_underneath() {
    let mut world = World::with_seed(1);
    world.generate_chunk(0, 0);
    let buried = Point3::new(5, 63, 5);
    assert!(!world.chunk(ChunkPos::new(0, 0)).unwrap().mesh().contains(buried));

    world.remove_block(5, 64, 5);

    let mesh = world.chunk(ChunkPos::new(0, 0)).unwrap().mesh();
    assert!(mesh.contains(buried));
    assert!(!mesh.contains(Point3::new(5, 64, 5)));
    assert!(mesh.contains(Point3::new(4, 64, 5)));
    assert_eq!(world.get_block(5, 64, 5), AIR);
}

#[test]
fn unloaded_neighbours_leave_the_wall_exposed() {
    let mut world = world_without_neighbor_rebuilds();
    world.generate_chunk(0, 0);

    let wall = Point3::new(15, 30, 5);
    let floor = Point3::new(15, 0, 5);
    let mesh = world.chunk(ChunkPos::new(0, 0)).unwrap().mesh();
    assert!(mesh.contains(wall));
    assert!(!mesh.contains(floor));

    // Without neighbour rebuilds the stale wall stays drawn.
    world.generate_chunk(1, 0);
    assert!(world.chunk(ChunkPos::new(0, 0)).unwrap().mesh().contains(wall));
}

#[test]
fn loading_a_neighbour_hides_the_shared_wall() {
    let mut world = World::with_seed(3);
    world.generate_chunk(0, 0);
    let wall = Point3::new(15, 30, 5);
    assert!(world.chunk(ChunkPos::new(0, 0)).unwrap().mesh().contains(wall));

    world.generate_chunk(1, 0);

    assert!(!world.chunk(ChunkPos::new(0, 0)).unwrap().mesh().contains(wall));
    assert!(!world.chunk(ChunkPos::new(1, 0)).unwrap().mesh().contains(Point3::new(0, 30, 5)));
}

#[test]
fn edge_writes_rebuild_the_neighbouring_chunk() {
    let mut world = World::with_seed(3);
    world.generate_chunk(0, 0);
    world.generate_chunk(1, 0);

    let across = Point3::new(15, 63, 5);
    assert!(!world.chunk(ChunkPos::new(0, 0)).unwrap().mesh().contains(across));

    // Dig a two-deep hole on the eastern side of the seam.
    world.remove_block(16, 64, 5);
    world.remove_block(16, 63, 5);

    assert!(world.chunk(ChunkPos::new(0, 0)).unwrap().mesh().contains(across));
    assert!(world.root().is_attached(ChunkPos::new(0, 0)));
}

#[test]
fn beds_and_chests_are_drawn_individually() {
    let mut world = World::with_seed(3);
    world.set_block(3, 65, 3, BlockType::BED.id());
    world.set_block(4, 65, 3, BlockType::CHEST.id());
    world.set_block(5, 65, 3, BlockType::PLANKS.id());

    let mesh = world.chunk(ChunkPos::new(0, 0)).unwrap().mesh();
    let shaped: HashMap<BlockId, GeometryKind> = mesh
        .shaped
        .iter()
        .map(|shaped| (shaped.block, shaped.geometry))
        .collect();
    assert_eq!(shaped.get(&BlockType::BED.id()), Some(&GeometryKind::Bed));
    assert_eq!(shaped.get(&BlockType::CHEST.id()), Some(&GeometryKind::Chest));
    assert!(mesh.batch(BlockType::BED.id()).is_none());
    assert!(mesh.batch(BlockType::CHEST.id()).is_none());
    assert!(mesh
        .batch(BlockType::PLANKS.id())
        .is_some_and(|batch| batch.positions == vec![Point3::new(5, 65, 3)]));
}

#[test]
fn isolated_meshing_matches_meshing_with_unloaded_neighbours() {
    let terrain = TerrainGenerator::new(99);
    let ores = OreCatalog::generate();
    let ore_config = OreConfig::default();
    let generator = ChunkGenerator::new(&terrain, &ores, &ore_config);

    let mut chunk: Chunk = generator.generate(ChunkPos::new(-4, 7));
    let mut materials = MaterialCache::new();
    let catalog = PaletteCatalog;

    let empty: HashMap<ChunkPos, Chunk> = HashMap::new();
    let with_map = ChunkMesher::new(&mut materials, &catalog, &ores).build(&chunk, &empty);
    let with_isolated = ChunkMesher::new(&mut materials, &catalog, &ores).build(&chunk, &Isolated);
    assert_eq!(with_map, with_isolated);

    let mut mesher = ChunkMesher::new(&mut materials, &catalog, &ores);
    chunk.rebuild_mesh_isolated(&mut mesher);
    assert_eq!(chunk.mesh(), &with_isolated);

    chunk.dispose();
    assert!(chunk.mesh().is_empty());
}
