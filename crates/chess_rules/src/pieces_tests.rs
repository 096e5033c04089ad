use super::*;

fn board(placement: &str) -> Board {
    Board::from_placement(placement).unwrap()
}

fn sq(row: u8, col: u8) -> Square {
    Square::new(row, col)
}

#[test]
fn test_alliance_overlap_rejects_every_kind() {
    // Each white piece on row 7 with a white pawn on every square it could reach.
    let b = Board::standard();
    for (from, _) in b.pieces().filter(|(_, pc)| pc.side == Side::White) {
        for (to, _) in b.pieces().filter(|(_, pc)| pc.side == Side::White) {
            assert!(is_alliance_overlap(&b, from, to));
            assert!(!is_valid_move(&b, from, to), "{from} -> {to}");
        }
    }
}

#[test]
fn test_empty_start_is_never_valid() {
    let b = Board::standard();
    assert!(!is_valid_move(&b, sq(4, 4), sq(3, 4)));
    assert!(!is_valid_path(&b, sq(4, 4), sq(3, 4)));
}

#[test]
fn test_rook_geometry() {
    let b = board("4k3/8/8/8/3R4/8/8/4K3");
    let r = sq(4, 3);
    assert!(is_valid_move(&b, r, sq(4, 0)));
    assert!(is_valid_move(&b, r, sq(0, 3)));
    assert!(!is_valid_move(&b, r, sq(5, 4)));
    assert!(!is_valid_move(&b, r, r));
}

#[test]
fn test_bishop_geometry() {
    let b = board("4k3/8/8/8/3B4/8/8/4K3");
    let bi = sq(4, 3);
    assert!(is_valid_move(&b, bi, sq(7, 6)));
    assert!(is_valid_move(&b, bi, sq(1, 0)));
    assert!(!is_valid_move(&b, bi, sq(4, 5)));
    assert!(!is_valid_move(&b, bi, sq(6, 4)));
}

#[test]
fn test_queen_geometry_is_rook_plus_bishop() {
    let b = board("4k3/8/8/8/3Q4/8/8/4K3");
    let q = sq(4, 3);
    for to in Square::all() {
        let (dr, dc) = q.delta(to);
        let (ar, ac) = (dr.unsigned_abs(), dc.unsigned_abs());
        let expected = to != q && b.piece_at(to).map(|p| p.side) != Some(Side::White)
            && ((ar == 0) != (ac == 0) || (ar == ac && ar != 0));
        assert_eq!(is_valid_move(&b, q, to), expected, "{q} -> {to}");
    }
}

#[test]
fn test_knight_jumps_over_everything() {
    let b = Board::standard();
    let n = sq(7, 1);
    for to in [sq(5, 0), sq(5, 2)] {
        assert!(is_valid_move(&b, n, to));
        assert!(is_valid_path(&b, n, to));
    }
    assert!(!is_valid_move(&b, n, sq(6, 3)));
    assert!(!is_valid_move(&b, n, sq(5, 1)));
}

#[test]
fn test_knight_path_clear_for_every_geometric_destination() {
    let b = board("4k3/8/2ppp3/2pNp3/2ppp3/8/8/4K3");
    let n = sq(3, 3);
    let dests: Vec<Square> = Square::all().filter(|&t| is_valid_move(&b, n, t)).collect();
    assert_eq!(dests.len(), 8);
    assert!(dests.iter().all(|&t| is_valid_path(&b, n, t)));
}

#[test]
fn test_king_geometry() {
    let b = board("4k3/8/8/8/3K4/8/8/8");
    let k = sq(4, 3);
    let dests = Square::all().filter(|&t| is_valid_move(&b, k, t)).count();
    assert_eq!(dests, 8);
    assert!(!is_valid_move(&b, k, sq(2, 3)));
}

#[test]
fn test_slider_obstruction_toggles() {
    let mut b = board("4k3/8/8/8/8/8/8/R3K2B");
    let rook = sq(7, 0);
    let target = sq(2, 0);
    assert!(is_valid_move(&b, rook, target));
    assert!(is_valid_path(&b, rook, target));

    b.place(sq(4, 0), Piece::new(Side::Black, PieceKind::Knight));
    assert!(!is_valid_path(&b, rook, target));
    b.take(sq(4, 0));
    assert!(is_valid_path(&b, rook, target));

    let bishop = sq(7, 7);
    assert!(is_valid_path(&b, bishop, sq(3, 3)));
    b.place(sq(5, 5), Piece::new(Side::White, PieceKind::Pawn));
    assert!(!is_valid_path(&b, bishop, sq(3, 3)));
    // Squares short of the blocker stay reachable.
    assert!(is_valid_path(&b, bishop, sq(6, 6)));
}

#[test]
fn test_queen_obstruction_on_all_lines() {
    let mut b = board("4k3/8/8/8/3Q4/8/8/4K3");
    let q = sq(4, 3);
    for (blocker, target) in [
        (sq(4, 5), sq(4, 7)),
        (sq(2, 3), sq(0, 3)),
        (sq(2, 1), sq(1, 0)),
        (sq(6, 5), sq(7, 6)),
    ] {
        assert!(is_valid_path(&b, q, target));
        b.place(blocker, Piece::new(Side::Black, PieceKind::Pawn));
        assert!(!is_valid_path(&b, q, target));
        b.take(blocker);
    }
}

#[test]
fn test_pawn_double_step_needs_both_cells_empty() {
    let mut b = board("4k3/8/8/8/8/8/4P3/4K3");
    let p = sq(6, 4);
    assert!(is_valid_move(&b, p, sq(4, 4)));
    assert!(is_valid_path(&b, p, sq(4, 4)));

    b.place(sq(5, 4), Piece::new(Side::Black, PieceKind::Knight));
    assert!(!is_valid_path(&b, p, sq(4, 4)));
    assert!(!is_valid_path(&b, p, sq(5, 4)));
    b.take(sq(5, 4));

    b.place(sq(4, 4), Piece::new(Side::Black, PieceKind::Knight));
    assert!(!is_valid_path(&b, p, sq(4, 4)));
    assert!(is_valid_path(&b, p, sq(5, 4)));
}

#[test]
fn test_moved_pawn_only_steps_once() {
    let mut b = board("4k3/8/8/8/8/8/4P3/4K3");
    let mut pawn = b.take(sq(6, 4)).unwrap();
    pawn.has_moved = true;
    b.place(sq(5, 4), pawn);
    assert!(is_valid_move(&b, sq(5, 4), sq(4, 4)));
    assert!(!is_valid_move(&b, sq(5, 4), sq(3, 4)));
}

#[test]
fn test_pawn_direction_and_captures() {
    let b = board("4k3/8/8/3p4/4P3/8/8/4K3");
    let white = sq(4, 4);
    let black = sq(3, 3);
    // Backwards and sideways are never legal.
    assert!(!is_valid_move(&b, white, sq(5, 4)));
    assert!(!is_valid_move(&b, white, sq(4, 5)));
    assert!(!is_valid_move(&b, black, sq(2, 3)));
    // Diagonal needs an enemy on the target.
    assert!(is_valid_move(&b, white, black));
    assert!(is_valid_path(&b, white, black));
    assert!(is_valid_move(&b, black, white));
    assert!(!is_valid_move(&b, white, sq(3, 5)));
    // Straight moves never capture.
    let blocked = board("4k3/8/8/4p3/4P3/8/8/4K3");
    assert!(is_valid_move(&blocked, white, sq(3, 4)));
    assert!(!is_valid_path(&blocked, white, sq(3, 4)));
}

#[test]
fn test_king_path_refuses_attacked_square() {
    let b = board("4k3/8/8/8/8/8/r7/4K3");
    let k = sq(7, 4);
    // Row 6 is covered by the rook.
    assert!(is_valid_move(&b, k, sq(6, 4)));
    assert!(!is_valid_path(&b, k, sq(6, 4)));
    assert!(is_valid_path(&b, k, sq(7, 5)));
}

#[test]
fn test_king_cannot_retreat_along_attack_line() {
    let b = board("4k3/8/8/8/8/8/8/r3K3");
    let k = sq(7, 4);
    // Stepping away along the checking row is still on the rook's line.
    assert!(!is_valid_path(&b, k, sq(7, 5)));
    assert!(is_valid_path(&b, k, sq(6, 5)));
}

#[test]
fn test_king_path_does_not_mutate_board() {
    let b = board("4k3/8/8/8/8/8/r7/4K3");
    let before = b.clone();
    let _ = is_valid_path(&b, sq(7, 4), sq(6, 4));
    assert_eq!(b, before);
}

#[test]
fn test_squares_between() {
    assert_eq!(
        squares_between(sq(0, 4), sq(4, 4)),
        vec![sq(1, 4), sq(2, 4), sq(3, 4)]
    );
    assert_eq!(squares_between(sq(7, 7), sq(5, 5)), vec![sq(6, 6)]);
    assert!(squares_between(sq(0, 0), sq(1, 2)).is_empty());
    assert!(squares_between(sq(3, 3), sq(3, 4)).is_empty());
}
