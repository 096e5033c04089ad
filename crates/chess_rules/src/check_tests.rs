use super::*;

fn board(placement: &str) -> Board {
    Board::from_placement(placement).unwrap()
}

fn sq(row: u8, col: u8) -> Square {
    Square::new(row, col)
}

#[test]
fn test_find_king() {
    let b = Board::standard();
    assert_eq!(find_king(&b, Side::White), Ok(sq(7, 4)));
    assert_eq!(find_king(&b, Side::Black), Ok(sq(0, 4)));

    let no_black = board("8/8/8/8/8/8/8/4K3");
    assert_eq!(
        find_king(&no_black, Side::Black),
        Err(RulesError::MissingKing(Side::Black))
    );
    assert_eq!(checkmate(&no_black, Side::Black), Err(RulesError::MissingKing(Side::Black)));
}

#[test]
fn test_rook_check_along_file() {
    // Rook on (0,4), white king on (7,4), nothing in between.
    let mut b = board("4r3/8/8/8/8/8/8/k3K3");
    assert_eq!(in_check(&b, sq(7, 4)), Some(sq(0, 4)));

    b.place(sq(4, 4), Piece::new(Side::Black, PieceKind::Bishop));
    assert_eq!(in_check(&b, sq(7, 4)), None);
    b.place(sq(4, 4), Piece::new(Side::White, PieceKind::Knight));
    assert_eq!(in_check(&b, sq(7, 4)), None);
}

#[test]
fn test_start_position_has_no_check() {
    let b = Board::standard();
    assert_eq!(in_check(&b, sq(7, 4)), None);
    assert_eq!(in_check(&b, sq(0, 4)), None);
    assert_eq!(in_check(&b, sq(4, 4)), None);
}

#[test]
fn test_pawn_checks_only_diagonally() {
    // Black pawn directly in front of the white king gives no check.
    let b = board("k7/8/8/8/8/8/4p3/4K3");
    assert_eq!(in_check(&b, sq(7, 4)), None);

    let b = board("k7/8/8/8/8/8/3p4/4K3");
    assert_eq!(in_check(&b, sq(7, 4)), Some(sq(6, 3)));

    // A white pawn attacks toward row 0 only.
    let b = board("8/8/8/8/3k4/4P3/8/K7");
    assert_eq!(in_check(&b, sq(4, 3)), Some(sq(5, 4)));
    let b = board("8/8/8/8/4P3/3k4/8/K7");
    assert_eq!(in_check(&b, sq(5, 3)), None);
}

#[test]
fn test_knight_check_ignores_blockers() {
    let b = board("k7/8/8/8/8/3n4/3PPP2/3QKB2");
    assert_eq!(in_check(&b, sq(7, 4)), Some(sq(5, 3)));
}

#[test]
fn test_adjacent_king_counts_as_attacker() {
    // The black king on (5,4) covers (6,4) even though that square is defended by the rook.
    let b = board("8/8/8/8/8/4k3/8/4K2R");
    let mut sim = b.clone();
    let king = sim.take(sq(7, 4)).unwrap();
    sim.place(sq(6, 4), king);
    assert_eq!(in_check(&sim, sq(6, 4)), Some(sq(5, 4)));
    assert!(!is_valid_path(&b, sq(7, 4), sq(6, 4)));
}

#[test]
fn test_attack_line() {
    assert_eq!(
        attack_line(sq(0, 4), sq(7, 4)),
        vec![sq(0, 4), sq(1, 4), sq(2, 4), sq(3, 4), sq(4, 4), sq(5, 4), sq(6, 4)]
    );
    assert_eq!(attack_line(sq(4, 0), sq(7, 3)), vec![sq(4, 0), sq(5, 1), sq(6, 2)]);
    // Knights and adjacent attackers leave only the capture.
    assert_eq!(attack_line(sq(5, 3), sq(7, 4)), vec![sq(5, 3)]);
    assert_eq!(attack_line(sq(6, 3), sq(7, 4)), vec![sq(6, 3)]);
}

#[test]
fn test_back_rank_mate() {
    // Rook on row 7 checks the white king boxed in by its own pawns.
    let b = board("k7/8/8/8/8/8/5PPP/r5K1");
    assert_eq!(in_check(&b, sq(7, 6)), Some(sq(7, 0)));
    assert_eq!(checkmate(&b, Side::White), Ok(true));
}

#[test]
fn test_back_rank_mate_broken_by_interposer() {
    // The bishop on (5,3) can drop to (7,5) or (7,1) and block the rook.
    let b = board("k7/8/8/8/8/3B4/5PPP/r5K1");
    assert_eq!(checkmate(&b, Side::White), Ok(false));
}

#[test]
fn test_back_rank_mate_broken_by_capture() {
    let b = board("k7/R7/8/8/8/8/5PPP/r5K1");
    assert_eq!(checkmate(&b, Side::White), Ok(false));
}

#[test]
fn test_king_escape_breaks_mate() {
    let b = board("k7/8/8/8/8/8/5P1P/r5K1");
    assert_eq!(checkmate(&b, Side::White), Ok(false));
}

#[test]
fn test_not_in_check_is_not_mate() {
    assert_eq!(checkmate(&Board::standard(), Side::White), Ok(false));
    assert_eq!(checkmate(&Board::standard(), Side::Black), Ok(false));
}

#[test]
fn test_knight_mate_only_answered_by_capture() {
    // Smothered king: knight check, nothing to interpose.
    let b = board("6rk/5Npp/8/8/8/8/8/6K1");
    assert_eq!(in_check(&b, sq(0, 7)), Some(sq(1, 5)));
    assert_eq!(checkmate(&b, Side::Black), Ok(true));

    // A black bishop on (4,2) can take the knight.
    let b = board("6rk/5Npp/8/8/2b5/8/8/6K1");
    assert_eq!(checkmate(&b, Side::Black), Ok(false));
}

#[test]
fn test_pinned_interposer_does_not_save() {
    // Rook on row 7 checks the king on (7,7). The knight on (5,5) can block on
    // (7,4) or (7,6), but it is pinned by the bishop on (3,3).
    let b = board("k7/8/8/3b4/8/5N1p/7P/r6K");
    assert!(is_valid_move(&b, sq(5, 5), sq(7, 6)));
    assert!(is_valid_path(&b, sq(5, 5), sq(7, 6)));
    assert_eq!(checkmate(&b, Side::White), Ok(true));

    let unpinned = board("k7/8/8/8/8/5N1p/7P/r6K");
    assert_eq!(checkmate(&unpinned, Side::White), Ok(false));
}

#[test]
fn test_double_check_needs_king_move() {
    // Knight on (5,5) and rook on (7,0) both check the king on (7,6). The
    // bishop can take the knight or block the rook, never both.
    let b = board("k7/8/8/8/8/5n2/4BPPP/r5K1");
    assert_eq!(in_check(&b, sq(7, 6)), Some(sq(5, 5)));
    assert!(is_valid_move(&b, sq(6, 4), sq(5, 5)));
    assert_eq!(checkmate(&b, Side::White), Ok(true));
}
