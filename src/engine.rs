//! Built-in opponent: a greedy policy without lookahead.
//!
//! Enter from the bar, bear off while possible, then play the first legal
//! single-die move found for each die until the dice run out or nothing
//! moves.

use log::{debug, info};

use crate::backgammon::{Board, DiceSet, HalfMove, Landing, Player, Position};

/// Plays the rest of the turn for `player` with already rolled `dice`.
/// Returns the movements made in order.
pub fn play_greedy_turn(board: &mut Board, dice: &mut DiceSet, player: Player) -> Vec<HalfMove> {
    let mut played = Vec::new();

    while board.bar(player) > 0 && !dice.remaining().is_empty() {
        let mut entered_any = false;
        for die in dice.remaining().to_vec() {
            if board.bar(player) == 0 {
                break;
            }
            let Some(target) = board.orientation(player).entry_point(die) else {
                continue;
            };
            if !board.can_accept(target, player) || !dice.remaining().contains(&die) {
                continue;
            }
            let half_move = HalfMove::new(Position::Bar, Position::Point(target), die);
            if apply_half_move(board, dice, player, half_move) {
                played.push(half_move);
                entered_any = true;
            }
        }
        if !entered_any {
            break;
        }
    }

    if board.bar(player) > 0 {
        info!("{} still has {} on the bar and cannot enter", player, board.bar(player));
        return played;
    }

    while board.can_bear_off(player) {
        let Some((die, point)) = board.bear_off_plan(player, dice) else {
            break;
        };
        let half_move = HalfMove::new(Position::Point(point), Position::Off, die);
        if !apply_half_move(board, dice, player, half_move) {
            break;
        }
        played.push(half_move);
    }

    'dice: while !dice.remaining().is_empty() {
        let candidates = board.legal_half_moves(player, dice);
        for die in dice.remaining().to_vec() {
            let Some(&half_move) = candidates.iter().find(|hm| hm.distance() == die) else {
                continue;
            };
            if apply_half_move(board, dice, player, half_move) {
                played.push(half_move);
                continue 'dice;
            }
        }
        break;
    }

    debug!("{} played {:?}", player, played);
    played
}

/// Applies one single-die movement and spends its die. Nothing changes if
/// the die is not available or the board refuses the movement.
pub fn apply_half_move(
    board: &mut Board,
    dice: &mut DiceSet,
    player: Player,
    half_move: HalfMove,
) -> bool {
    let Some(plan) = dice.plan(half_move.distance()) else {
        return false;
    };
    let applied = match (half_move.from(), half_move.to()) {
        (Position::Bar, Position::Point(to)) => board.reenter(player, to) != Landing::Ignored,
        (Position::Point(from), Position::Point(to)) => {
            board.move_piece(player, from, to) != Landing::Ignored
        }
        (Position::Point(from), Position::Off) => board.bear_off(player, from),
        _ => false,
    };
    applied && dice.commit(&plan)
}
