//! Auction bidding: budget-capped value bids, with a single sampled
//! amount for the silent and once-around variants.

use crate::bot::GenCtx;
use crate::orchestrator::GenerationError;
use rand::Rng;
use stormhold_core::state::AuctionKind;
use stormhold_core::{Action, ActionKind, CardKind};
use tracing::{Level, event};

/// Quality assumed for a card the bot has not seen.
const UNSEEN_QUALITY: u8 = 2;

pub fn bid_generator(ctx: &mut GenCtx<'_>) -> Result<Option<Action>, GenerationError> {
    let Some(auction) = ctx.view.auction().copied() else {
        return Ok(None);
    };

    let budget = ctx.view.bid_budget();
    if budget == 0 {
        // A zero-budget bot always passes.
        return Ok(Some(Action::Pass(ActionKind::Bid)));
    }

    let quality = estimated_quality(ctx);
    if quality < ctx.params.bid_pass_quality {
        log_bid(ctx, &auction, quality, None, "low_quality");
        return Ok(Some(Action::Pass(ActionKind::Bid)));
    }

    if ctx.view.my_hand().len() as u8 >= ctx.params.bid_hand_cap {
        log_bid(ctx, &auction, quality, None, "hand_full");
        return Ok(Some(Action::Pass(ActionKind::Bid)));
    }

    let ceiling = bid_ceiling(ctx, quality, budget);

    let amount = match auction.kind {
        AuctionKind::Ascending => {
            let next = auction.high_bid + 1;
            if next > ceiling {
                log_bid(ctx, &auction, quality, None, "outbid");
                return Ok(Some(Action::Pass(ActionKind::Bid)));
            }
            next
        }
        AuctionKind::Silent | AuctionKind::OnceAround => {
            // One shot: sample inside the affordable range rather than
            // telegraphing the exact valuation.
            let floor = (ceiling / 2).max(1);
            ctx.rng.gen_range(floor..=ceiling)
        }
    };

    log_bid(ctx, &auction, quality, Some(amount), "bid");
    Ok(Some(Action::Bid { amount }))
}

/// Foresight gives the exact card; otherwise a flat unseen estimate,
/// nudged by how starved the hand is.
fn estimated_quality(ctx: &GenCtx<'_>) -> u8 {
    match ctx.view.grants().foresight_card {
        Some(card) => ctx.knowledge.card_quality(card),
        None => {
            if ctx.view.my_hand().is_empty() {
                UNSEEN_QUALITY + 1
            } else {
                UNSEEN_QUALITY
            }
        }
    }
}

fn bid_ceiling(ctx: &GenCtx<'_>, quality: u8, budget: u16) -> u16 {
    let value = quality as u16 * ctx.params.bid_quality_mult;
    let spendable = budget.saturating_sub(ctx.params.bid_reserve);
    value.min(spendable).max(u16::from(spendable > 0))
}

/// Karma at auction: break the bidding rules for a card worth it.
pub fn karma_bid_generator(ctx: &mut GenCtx<'_>) -> Result<Option<Action>, GenerationError> {
    let Some(card) = ctx
        .view
        .my_hand()
        .iter()
        .copied()
        .find(|card| matches!(card.kind(), CardKind::Karma))
    else {
        return Ok(None);
    };

    // Only worth burning on a card seen to be excellent.
    let Some(seen) = ctx.view.grants().foresight_card else {
        return Ok(None);
    };
    if ctx.knowledge.card_quality(seen) < 5 {
        return Ok(None);
    }
    Ok(Some(Action::Karma { card }))
}

fn log_bid(
    ctx: &GenCtx<'_>,
    auction: &stormhold_core::state::AuctionState,
    quality: u8,
    amount: Option<u16>,
    reason: &str,
) {
    if !tracing::enabled!(Level::INFO) {
        return;
    }
    event!(
        target: "stormhold_bot::bidding",
        Level::INFO,
        faction = %ctx.view.my_faction(),
        card_index = auction.card_index,
        high_bid = auction.high_bid,
        kind = ?auction.kind,
        quality,
        amount = ?amount,
        reason,
    );
}
