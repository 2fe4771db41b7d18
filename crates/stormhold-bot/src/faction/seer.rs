//! Seer overrides: auction foresight turns bidding from estimation into
//! pricing.

use crate::bidding::bid_generator;
use crate::bot::GenCtx;
use crate::orchestrator::GenerationError;
use stormhold_core::state::AuctionKind;
use stormhold_core::{Action, ActionKind};

/// With the card in plain sight, bid its exact worth and skip the
/// reserve a blind bidder keeps for bad surprises. Without foresight
/// (e.g. revoked by karma) the generic evaluator takes over.
pub fn foresight_bid(ctx: &mut GenCtx<'_>) -> Result<Option<Action>, GenerationError> {
    let Some(auction) = ctx.view.auction().copied() else {
        return Ok(None);
    };
    let Some(card) = ctx.view.grants().foresight_card else {
        return bid_generator(ctx);
    };

    let budget = ctx.view.bid_budget();
    if budget == 0 {
        return Ok(Some(Action::Pass(ActionKind::Bid)));
    }

    let quality = ctx.knowledge.card_quality(card);
    if quality < ctx.params.bid_pass_quality {
        return Ok(Some(Action::Pass(ActionKind::Bid)));
    }

    let ceiling = (quality as u16 * ctx.params.bid_quality_mult).min(budget);
    let amount = match auction.kind {
        AuctionKind::Ascending => auction.high_bid + 1,
        AuctionKind::Silent | AuctionKind::OnceAround => ceiling,
    };
    if amount > ceiling {
        return Ok(Some(Action::Pass(ActionKind::Bid)));
    }
    Ok(Some(Action::Bid { amount }))
}
