//! Demo lookup: no network, just a delay and a fabricated parcel.
//!
//! Mirrors the behavior the product shipped before the NSPD integration:
//! fixed address and category, random area, rectangular boundary.

use std::time::Duration;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::Mutex;

use crate::domain::model::{CadastralNumber, Coordinate, ParcelRecord};
use crate::domain::ports::ParcelLookup;
use crate::utils::error::Result;

pub const DEMO_ADDRESS: &str = "Московская область, Раменский район, д. Заболотье";
pub const DEMO_CATEGORY: &str = "Земли населённых пунктов";

const DEMO_DELAY: Duration = Duration::from_millis(1500);
const MIN_AREA_SQ_M: u32 = 500;
const MAX_AREA_SQ_M: u32 = 15_499;

fn demo_boundary() -> Vec<Coordinate> {
    vec![
        Coordinate {
            lat: 55.7558,
            lon: 37.6173,
        },
        Coordinate {
            lat: 55.7558,
            lon: 37.6193,
        },
        Coordinate {
            lat: 55.7548,
            lon: 37.6193,
        },
        Coordinate {
            lat: 55.7548,
            lon: 37.6173,
        },
    ]
}

pub struct DemoLookup {
    delay: Duration,
    rng: Mutex<StdRng>,
}

impl DemoLookup {
    pub fn new() -> Self {
        Self {
            delay: DEMO_DELAY,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Deterministic variant for tests.
    pub fn seeded(seed: u64) -> Self {
        Self {
            delay: DEMO_DELAY,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl Default for DemoLookup {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ParcelLookup for DemoLookup {
    async fn lookup(&self, cadastral_number: &CadastralNumber) -> Result<ParcelRecord> {
        tokio::time::sleep(self.delay).await;

        let area = {
            let mut rng = self.rng.lock().await;
            f64::from(rng.gen_range(MIN_AREA_SQ_M..=MAX_AREA_SQ_M))
        };
        tracing::debug!("Fabricated demo parcel with area {} m²", area);

        ParcelRecord::new(
            cadastral_number.clone(),
            DEMO_ADDRESS.to_string(),
            area,
            DEMO_CATEGORY.to_string(),
            demo_boundary(),
        )
    }
}
