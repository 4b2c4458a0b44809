//! The reference council: four guardians that answer chat commands.
//!
//! | Guardian        | Role                    | Reacts to                      |
//! |-----------------|-------------------------|--------------------------------|
//! | `Lilybear`      | Voice & Operations      | everything; `/route <payload>` |
//! | `Athena`        | Strategy & Intelligence | bodies containing `status`     |
//! | `Serafina`      | Comms & Routing         | bodies starting with `bless`   |
//! | `ShadowFlowers` | Sentiment & Rituals     | bodies containing `blessing`   |
//!
//! A `!bless` from chat therefore travels Serafina -> ShadowFlowers ->
//! Lilybear, all within one outer publish.

mod athena;
mod lilybear;
mod serafina;
mod shadow_flowers;

use std::sync::Arc;

use tracing::info;

use super::attach;
use crate::bus::{DeliveryStats, Subscription, WhisperBus};
use crate::error::BusError;
use crate::whisper::BROADCAST;

pub use athena::Athena;
pub use lilybear::Lilybear;
pub use serafina::Serafina;
pub use shadow_flowers::{ShadowFlowers, BLESSING_LINE};

pub const LILYBEAR: &str = "Lilybear";
pub const ATHENA: &str = "Athena";
pub const SERAFINA: &str = "Serafina";
pub const SHADOW_FLOWERS: &str = "ShadowFlowers";

/// All four guardians attached to one bus.
///
/// The council owns the guardians; the bus only sees them weakly, so
/// dropping the council silences them.
pub struct Council {
    bus: WhisperBus,
    pub lilybear: Arc<Lilybear>,
    pub athena: Arc<Athena>,
    pub serafina: Arc<Serafina>,
    pub shadow_flowers: Arc<ShadowFlowers>,
    subscriptions: Vec<Subscription>,
}

impl Council {
    /// Create the guardians and attach them in a fixed order:
    /// Lilybear, Athena, Serafina, ShadowFlowers.
    pub fn assemble(bus: &WhisperBus) -> Result<Self, BusError> {
        let lilybear = Arc::new(Lilybear::new());
        let athena = Arc::new(Athena);
        let serafina = Arc::new(Serafina);
        let shadow_flowers = Arc::new(ShadowFlowers::new());

        let subscriptions = vec![
            attach(bus, &lilybear)?,
            attach(bus, &athena)?,
            attach(bus, &serafina)?,
            attach(bus, &shadow_flowers)?,
        ];
        info!(members = subscriptions.len(), "council assembled");

        Ok(Self {
            bus: bus.clone(),
            lilybear,
            athena,
            serafina,
            shadow_flowers,
            subscriptions,
        })
    }

    /// Lilybear broadcasts that the council is ready.
    pub fn announce(&self) -> Result<DeliveryStats, BusError> {
        self.bus
            .whisper(LILYBEAR, BROADCAST, "The council is assembled.")
    }

    /// Subscriptions in attach order.
    pub fn subscriptions(&self) -> &[Subscription] {
        &self.subscriptions
    }

    /// Detach every guardian from the bus.
    pub fn disband(&self) {
        for subscription in &self.subscriptions {
            subscription.unregister();
        }
        info!("council disbanded");
    }
}
