//! Procedural level map generation

use rand::Rng;

use super::state::Tile;

/// Chance that a pit opens after a ground tile
pub const PIT_CHANCE: f32 = 0.12;
/// Chance that a non-pit interior tile holds a chest
pub const CHEST_CHANCE: f32 = 0.08;

/// Number of guaranteed ground tiles at each end of the map
const SAFE_EDGE_TILES: usize = 2;

/// Generate a level map of `tile_count` tiles.
///
/// The first and last two tiles are always ground. A pit may only open
/// directly after a ground tile, so pits never touch each other or a chest.
pub fn generate_map<R: Rng + ?Sized>(rng: &mut R, tile_count: usize) -> Vec<Tile> {
    let mut map = Vec::with_capacity(tile_count);
    let mut last_ground = true;

    for i in 0..tile_count {
        let edge = i < SAFE_EDGE_TILES || i + SAFE_EDGE_TILES >= tile_count;
        if edge {
            map.push(Tile::Ground);
            last_ground = true;
            continue;
        }

        let pit_roll: f32 = rng.random();
        let tile = if last_ground && pit_roll < PIT_CHANCE {
            Tile::Pit
        } else if rng.random::<f32>() < CHEST_CHANCE {
            Tile::Chest
        } else {
            Tile::Ground
        };
        last_ground = tile == Tile::Ground;
        map.push(tile);
    }

    log::debug!(
        "Generated map: {} tiles, {} pits, {} chests",
        tile_count,
        map.iter().filter(|t| **t == Tile::Pit).count(),
        map.iter().filter(|t| **t == Tile::Chest).count()
    );
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn assert_well_formed(map: &[Tile]) {
        let n = map.len();
        if n == 0 {
            return;
        }
        assert_eq!(map[0], Tile::Ground);
        assert_eq!(map[n.min(2) - 1], Tile::Ground);
        assert_eq!(map[n - 1], Tile::Ground);
        assert_eq!(map[n.saturating_sub(2)], Tile::Ground);
        for pair in map.windows(2) {
            if pair[1] == Tile::Pit {
                assert_eq!(pair[0], Tile::Ground, "pit must follow ground: {:?}", map);
            }
        }
    }

    #[test]
    fn test_generate_map_length() {
        let mut rng = Pcg32::seed_from_u64(1);
        for n in [0, 1, 3, 4, 5, 34, 38, 200] {
            let map = generate_map(&mut rng, n);
            assert_eq!(map.len(), n);
            assert_well_formed(&map);
        }
    }

    #[test]
    fn test_tiny_maps_are_all_ground() {
        let mut rng = Pcg32::seed_from_u64(9);
        for n in 0..=4 {
            assert!(generate_map(&mut rng, n).iter().all(|t| *t == Tile::Ground));
        }
    }

    #[test]
    fn test_generate_map_deterministic() {
        let a = generate_map(&mut Pcg32::seed_from_u64(77), 60);
        let b = generate_map(&mut Pcg32::seed_from_u64(77), 60);
        assert_eq!(a, b);
    }

    #[test]
    fn test_long_map_has_hazards_and_chests() {
        let map = generate_map(&mut Pcg32::seed_from_u64(5), 2000);
        assert!(map.contains(&Tile::Pit));
        assert!(map.contains(&Tile::Chest));
        assert_well_formed(&map);
    }
}
