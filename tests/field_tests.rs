//! Field tests - occupancy, locking and row clearing

use blockfall::core::{Field, FieldError};

#[test]
fn test_field_new_empty() {
    let field = Field::new(10, 20);
    assert_eq!(field.width(), 10);
    assert_eq!(field.height(), 20);
    for row in 0..20 {
        for col in 0..10 {
            assert_eq!(field.get(row, col), Some(None), "cell ({row}, {col})");
        }
    }
}

#[test]
fn test_walls_floor_and_ceiling_are_occupied() {
    let field = Field::new(10, 20);
    assert!(field.is_occupied(5, -1));
    assert!(field.is_occupied(5, 10));
    assert!(field.is_occupied(20, 0));
    assert!(field.is_occupied(-1, 0));
    assert!(!field.is_occupied(19, 9));
}

#[test]
fn test_lock_rejects_invalid_cells_without_writing() {
    let mut field = Field::new(10, 20);
    field.lock([(19, 0)], 1).unwrap();
    assert_eq!(
        field.lock([(18, 0), (19, 0)], 2),
        Err(FieldError::InvalidCell { row: 19, col: 0 })
    );
    assert_eq!(field.get(18, 0), Some(None));
    assert_eq!(
        field.lock([(0, 10)], 2),
        Err(FieldError::InvalidCell { row: 0, col: 10 })
    );
    assert_eq!(field.occupied_count(), 1);
}

#[test]
fn test_clear_is_idempotent_without_completed_rows() {
    let mut field = Field::from_rows(&[
        "..........",
        "#.#.#.#.#.",
        "#########.",
    ]);
    let before = field.clone();
    assert_eq!(field.clear_completed_rows(), 0);
    assert_eq!(field, before);
    assert_eq!(field.clear_completed_rows(), 0);
    assert_eq!(field, before);
}

#[test]
fn test_clear_rows_two_and_five() {
    let mut field = Field::new(10, 20);
    let mut cells = Vec::new();
    for col in 0..10 {
        cells.push((2, col));
        cells.push((5, col));
    }
    // Partial rows with distinct markers.
    cells.extend([(0, 0), (1, 1), (3, 3), (4, 4), (6, 6), (19, 9)]);
    field.lock(cells, 1).unwrap();

    assert_eq!(field.clear_completed_rows(), 2);

    let rows = field.to_rows();
    // Rows 0, 1 move down by two; rows 3, 4 move down by one; rows below 5 stay.
    assert_eq!(rows[0], "..........");
    assert_eq!(rows[1], "..........");
    assert_eq!(rows[2], "#.........");
    assert_eq!(rows[3], ".#........");
    assert_eq!(rows[4], "...#......");
    assert_eq!(rows[5], "....#.....");
    assert_eq!(rows[6], "......#...");
    assert_eq!(rows[19], ".........#");
    assert_eq!(field.occupied_count(), 6);
}

#[test]
fn test_remove_reports_pre_shift_indices() {
    let mut field = Field::from_rows(&[
        "###",
        "#..",
        "###",
        "###",
    ]);
    assert_eq!(field.remove_completed_rows(), vec![0, 2, 3]);
    assert_eq!(field.to_rows(), vec!["...", "...", "...", "#.."]);
}
