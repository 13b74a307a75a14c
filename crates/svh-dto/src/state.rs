use serde::Deserialize;
use serde::Serialize;
use serde::de::Error as _;
use serde::ser::SerializeMap;
use svh_cards::Card;
use svh_gameplay::Counts;
use svh_gameplay::Projection;

/// The public state shape at every step boundary. Contains everything the
/// player may see and nothing that depends on the hidden draw order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiState {
    pub hand: Vec<String>,
    pub p_remaining: u8,
    pub d_remaining: u8,
    pub score_total: u32,
    pub deck_remaining_count: usize,
    pub deck_remaining_counts: ApiCounts,
}

impl From<&Projection> for ApiState {
    fn from(projection: &Projection) -> Self {
        Self {
            hand: projection.hand.iter().map(Card::to_string).collect(),
            p_remaining: projection.plays,
            d_remaining: projection.discards,
            score_total: projection.score,
            deck_remaining_count: projection.remaining(),
            deck_remaining_counts: ApiCounts(projection.counts),
        }
    }
}

/// The counts map with its canonical, byte-stable serialization.
///
/// Keys are enumerated in canonical deck order, never lexicographically:
/// the iteration order is part of the contract, and a content-dependent
/// order could leak information about the internal draw order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiCounts(pub Counts);

impl From<Counts> for ApiCounts {
    fn from(counts: Counts) -> Self {
        Self(counts)
    }
}
impl From<ApiCounts> for Counts {
    fn from(api: ApiCounts) -> Self {
        api.0
    }
}

impl Serialize for ApiCounts {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        for (card, count) in self.0.cards() {
            map.serialize_entry(&card.to_string(), &count)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ApiCounts {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let entries = std::collections::BTreeMap::<String, u8>::deserialize(deserializer)?;
        let mut counts = Counts::empty();
        for (key, n) in entries {
            let card = Card::try_from(key.as_str()).map_err(D::Error::custom)?;
            for _ in 0..n {
                counts.insert(card);
            }
        }
        Ok(Self(counts))
    }
}
