use voxel_world::config::{OreConfig, TerrainConfig};
use voxel_world::voxels::block::{block_type::BlockType, AIR, BEDROCK, FILL};
use voxel_world::voxels::chunk::{
    chunk_generation::ChunkGenerator, ChunkPos, CHUNK_DIMENSION, CHUNK_HEIGHT,
};
use voxel_world::voxels::generation::ores::OreCatalog;
use voxel_world::voxels::generation::terrain::{Biome, TerrainGenerator};

#[test]
fn terrain_functions_are_deterministic() {
    let a = TerrainGenerator::new(31337);
    let b = TerrainGenerator::new(31337);
    for x in (-500..500).step_by(13) {
        for z in (-500..500).step_by(17) {
            assert_eq!(a.height(x, z), b.height(x, z));
            assert_eq!(a.biome(x, z), b.biome(x, z));
            assert_eq!(a.decoration(x, z), b.decoration(x, z));
        }
    }
}

#[test]
fn seeds_change_the_landscape() {
    let a = TerrainGenerator::new(1);
    let b = TerrainGenerator::new(2);
    let differs = (0..200).any(|i| a.height(200 + i * 7, -300) != b.height(200 + i * 7, -300));
    assert!(differs, "two seeds produced identical terrain");
}

#[test]
fn custom_constants_are_honoured() {
    let config = TerrainConfig {
        flat_radius: 10.0,
        plateau_height: 70,
        min_height: 65,
        max_height: 75,
        ..TerrainConfig::default()
    };
    let generator = TerrainGenerator::with_config(8, config);
    assert_eq!(generator.height(0, 0), 70);
    for x in (-400..400).step_by(23) {
        let h = generator.height(x, 250);
        assert!((65..=75).contains(&h), "height {h}");
    }
}

#[test]
fn generated_columns_match_the_terrain_functions() {
    let terrain = TerrainGenerator::new(4242);
    let ores = OreCatalog::empty();
    let ore_config = OreConfig::default();
    let generator = ChunkGenerator::new(&terrain, &ores, &ore_config);

    for position in [ChunkPos::new(0, 0), ChunkPos::new(-5, 3), ChunkPos::new(9, -12)] {
        let chunk = generator.generate(position);
        let origin = position.origin();
        for x in 0..CHUNK_DIMENSION {
            for z in 0..CHUNK_DIMENSION {
                let (wx, wz) = (origin.x + x, origin.z + z);
                let height = terrain.height(wx, wz);
                let surface = chunk.get_block(x, height, z);
                let expected = if terrain.biome(wx, wz) == Biome::Desert {
                    BlockType::SAND.id()
                } else {
                    BlockType::GRASS.id()
                };
                assert_eq!(surface, expected, "surface at ({wx}, {height}, {wz})");
                assert_eq!(chunk.get_block(x, 0, z), BEDROCK);
                assert_eq!(chunk.get_block(x, height + 1, z), AIR);
                assert_eq!(chunk.get_block(x, CHUNK_HEIGHT - 1, z), AIR);
                for y in 1..height.min(63) {
                    assert_eq!(chunk.get_block(x, y, z), FILL, "fill at ({wx}, {y}, {wz})");
                }
                for y in 63..height {
                    assert_eq!(chunk.get_block(x, y, z), BlockType::DIRT.id());
                }
            }
        }
    }
}

#[test]
fn neighbouring_chunks_agree_on_their_seam() {
    let terrain = TerrainGenerator::new(77);
    let ores = OreCatalog::empty();
    let ore_config = OreConfig::default();
    let generator = ChunkGenerator::new(&terrain, &ores, &ore_config);

    let left = generator.generate(ChunkPos::new(6, 2));
    let right = generator.generate(ChunkPos::new(7, 2));
    for z in 0..CHUNK_DIMENSION {
        let world_z = 2 * CHUNK_DIMENSION + z;
        let left_height = terrain.height(7 * CHUNK_DIMENSION - 1, world_z);
        let right_height = terrain.height(7 * CHUNK_DIMENSION, world_z);
        assert_ne!(left.get_block(15, left_height, z), AIR);
        assert_ne!(right.get_block(0, right_height, z), AIR);
        assert_eq!(left.get_block(15, left_height + 1, z), AIR);
        assert_eq!(right.get_block(0, right_height + 1, z), AIR);
    }
}
