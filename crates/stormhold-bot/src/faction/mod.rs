//! Faction strategy variants.
//!
//! Catalogs are assembled once at bot construction from generic
//! generators plus faction-specific overrides. For a given faction and
//! action kind exactly one generator is active; nothing is re-resolved
//! per call.

mod betrayer;
mod magnate;
mod navigator;
mod nomad;
mod seer;

use crate::battle::{battle_generator, prescience_generator, voice_generator};
use crate::bidding::{bid_generator, karma_bid_generator};
use crate::deals::{deal_offer_generator, deal_response_generator};
use crate::orchestrator::{CatalogEntry, Catalogs, Generator};
use crate::revival::revival_generator;
use crate::shipment::{caravan_generator, move_generator, shipment_generator};
use stormhold_core::{ActionKind, Faction, Phase};

/// Builds the full per-phase catalog for one faction.
pub fn build_catalogs(faction: Faction) -> Catalogs {
    let mut catalogs = Catalogs::new();

    // Bidding: a karma play outranks a plain bid when it applies.
    catalogs.push(
        Phase::Bidding,
        CatalogEntry::new(ActionKind::Karma, "karma_bid", karma_bid_generator),
    );
    catalogs.push(
        Phase::Bidding,
        CatalogEntry::new(ActionKind::Bid, "bid", bid_for(faction)),
    );

    catalogs.push(
        Phase::Revival,
        CatalogEntry::new(ActionKind::Revival, "revival", revival_generator),
    );

    catalogs.push(
        Phase::Shipment,
        CatalogEntry::new(ActionKind::Shipment, "shipment", shipment_for(faction)),
    );
    catalogs.push(
        Phase::Shipment,
        CatalogEntry::new(ActionKind::Move, "move", move_generator),
    );
    if faction.permissions().local_placement {
        catalogs.push(
            Phase::Shipment,
            CatalogEntry::new(ActionKind::Caravan, "caravan", caravan_generator),
        );
    }

    // Battle: information plays come before the wheel is committed.
    if faction.permissions().may_voice {
        catalogs.push(
            Phase::Battle,
            CatalogEntry::new(ActionKind::Voice, "voice", voice_generator),
        );
    }
    if faction.permissions().may_prescience {
        catalogs.push(
            Phase::Battle,
            CatalogEntry::new(ActionKind::Prescience, "prescience", prescience_generator),
        );
    }
    catalogs.push(
        Phase::Battle,
        CatalogEntry::new(ActionKind::Battle, "battle", battle_for(faction)),
    );

    catalogs.push(
        Phase::Bargain,
        CatalogEntry::new(
            ActionKind::DealResponse,
            "deal_response",
            deal_response_generator,
        ),
    );
    catalogs.push(
        Phase::Bargain,
        CatalogEntry::new(ActionKind::DealOffer, "deal_offer", deal_offer_for(faction)),
    );

    catalogs
}

fn bid_for(faction: Faction) -> Generator {
    match faction {
        Faction::Seer => seer::foresight_bid,
        Faction::Magnate => magnate::treasury_bid,
        _ => bid_generator,
    }
}

fn shipment_for(faction: Faction) -> Generator {
    match faction {
        Faction::Nomad => nomad::desert_shipment,
        Faction::Navigator => navigator::tempo_shipment,
        _ => shipment_generator,
    }
}

fn battle_for(faction: Faction) -> Generator {
    match faction {
        Faction::Betrayer => betrayer::traitor_battle,
        _ => battle_generator,
    }
}

fn deal_offer_for(faction: Faction) -> Generator {
    match faction {
        Faction::Magnate => magnate::patron_deal,
        _ => deal_offer_generator,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_siren_carries_voice() {
        for faction in Faction::LOOP {
            let catalogs = build_catalogs(faction);
            let has_voice = catalogs
                .entries(Phase::Battle)
                .iter()
                .any(|e| e.kind == ActionKind::Voice);
            assert_eq!(has_voice, faction == Faction::Siren);
        }
    }

    #[test]
    fn only_nomad_carries_caravan() {
        for faction in Faction::LOOP {
            let catalogs = build_catalogs(faction);
            let has_caravan = catalogs
                .entries(Phase::Shipment)
                .iter()
                .any(|e| e.kind == ActionKind::Caravan);
            assert_eq!(has_caravan, faction == Faction::Nomad);
        }
    }

    #[test]
    fn every_faction_answers_battle() {
        for faction in Faction::LOOP {
            let catalogs = build_catalogs(faction);
            assert!(
                catalogs
                    .entries(Phase::Battle)
                    .iter()
                    .any(|e| e.kind == ActionKind::Battle)
            );
        }
    }

    #[test]
    fn one_generator_per_kind_and_phase() {
        for faction in Faction::LOOP {
            let catalogs = build_catalogs(faction);
            for phase in Phase::LOOP {
                let entries = catalogs.entries(phase);
                for entry in entries {
                    let same_kind = entries.iter().filter(|e| e.kind == entry.kind).count();
                    assert_eq!(same_kind, 1, "{faction} {phase} {:?}", entry.kind);
                }
            }
        }
    }
}
