//! Bargain phase: answering deal offers and, rarely, making one.

use crate::bot::GenCtx;
use crate::orchestrator::GenerationError;
use stormhold_core::{Action, DealAsk, DealTerms, Faction, PendingDeal};
use tracing::{Level, event};

pub fn deal_response_generator(ctx: &mut GenCtx<'_>) -> Result<Option<Action>, GenerationError> {
    let Some(deal) = ctx.view.pending_deals().first().copied() else {
        return Ok(None);
    };
    let accept = worth_accepting(ctx, &deal);
    event!(
        target: "stormhold_bot::deals",
        Level::INFO,
        faction = %ctx.view.my_faction(),
        from = %deal.from,
        give = deal.terms.give_resources,
        ask = ?deal.terms.ask,
        accept,
    );
    Ok(Some(Action::DealResponse {
        offer: deal.id,
        accept,
    }))
}

fn worth_accepting(ctx: &GenCtx<'_>, deal: &PendingDeal) -> bool {
    if deal.terms.give_resources < ctx.params.deal_accept_min_gain {
        return false;
    }
    match deal.terms.ask {
        DealAsk::Truce => true,
        // Never sell passage through ground we hold.
        DealAsk::SafePassage(territory) => {
            ctx.view
                .battalion_at(ctx.view.my_faction(), territory)
                .is_empty()
        }
        // Foresight is the Seer's edge; everyone else has none to sell.
        DealAsk::ShareForesight => {
            ctx.view.my_faction().permissions().auction_foresight
                && deal.terms.give_resources >= ctx.params.deal_accept_min_gain * 2
        }
    }
}

/// Offer a truce to the strongest rival when someone else is about to
/// win and the treasury can afford to buy quiet.
pub fn deal_offer_generator(ctx: &mut GenCtx<'_>) -> Result<Option<Action>, GenerationError> {
    let me = ctx.view.my_faction();
    let threshold = ctx.view.stronghold_win_threshold();
    let threat = Faction::LOOP
        .iter()
        .copied()
        .filter(|f| *f != me)
        .find(|f| ctx.view.strongholds_held(*f) + 1 >= threshold);
    let Some(threat) = threat else {
        return Ok(None);
    };

    let give = ctx.params.deal_accept_min_gain;
    if ctx.view.resources(me) < give * 2 {
        return Ok(None);
    }

    // The strongest faction that is neither us nor the threat.
    let Some(partner) = Faction::LOOP
        .iter()
        .copied()
        .filter(|f| *f != me && *f != threat)
        .max_by_key(|f| ctx.view.board_forces(*f))
    else {
        return Ok(None);
    };
    if ctx.view.board_forces(partner) == 0 {
        return Ok(None);
    }

    Ok(Some(Action::DealOffer {
        to: partner,
        terms: DealTerms {
            give_resources: give,
            ask: DealAsk::Truce,
        },
    }))
}
