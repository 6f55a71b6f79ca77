/// Asserts that the cell at `(x, y)` holds exactly the given nutrition.
#[macro_export]
macro_rules! assert_nutrition {
    ($world:expr, $x:expr, $y:expr, $expected:expr) => {
        let cell = $world
            .cell_at(mycelia_data::GridPos::new($x, $y))
            .expect("No cell at position");
        assert_eq!(
            cell.nutrition(),
            $expected,
            "Nutrition mismatch at ({}, {})",
            $x,
            $y
        );
    };
}

/// Asserts that no cell occupies `(x, y)` and the tile is free.
#[macro_export]
macro_rules! assert_tile_empty {
    ($world:expr, $x:expr, $y:expr) => {
        let pos = mycelia_data::GridPos::new($x, $y);
        assert!($world.cell_at(pos).is_none(), "Cell still indexed at {}", pos);
        assert!(
            !$world.tile(pos).expect("Tile out of bounds").is_occupied(),
            "Tile {} still marked occupied",
            pos
        );
    };
}

/// Asserts the number of living fungi.
#[macro_export]
macro_rules! assert_population {
    ($world:expr, $count:expr) => {
        assert_eq!($world.organism_count(), $count, "Organism count mismatch");
    };
}
