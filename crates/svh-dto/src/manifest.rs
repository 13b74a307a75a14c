use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use svh_core::Points;
use svh_core::Seed;
use svh_gameplay::Error;
use svh_gameplay::Mode;
use svh_gameplay::Tier;

/// Calibrated seed pools, grouped by tier and separated by mode, plus the
/// per-tier challenge targets. Produced by the offline pipeline, loaded
/// once at runtime startup, immutable thereafter.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SeedManifest {
    pub practice: BTreeMap<String, Vec<Seed>>,
    pub challenge: BTreeMap<String, Vec<Seed>>,
    pub targets: BTreeMap<String, Points>,
}

impl SeedManifest {
    pub fn seeds(&self, mode: Mode, tier: Tier) -> Option<&[Seed]> {
        let pool = match mode {
            Mode::Practice => &self.practice,
            Mode::Challenge => &self.challenge,
        };
        pool.get(&tier.to_string()).map(Vec::as_slice)
    }

    /// The challenge target for a tier.
    pub fn target(&self, tier: Tier) -> Option<Points> {
        self.targets.get(&tier.to_string()).copied()
    }

    /// Uniform draw from a pool, for `start` requests that omit the seed.
    pub fn sample(&self, mode: Mode, tier: Tier) -> Result<Seed, Error> {
        let seeds = self.seeds(mode, tier).ok_or(Error::SeedManifestMissing)?;
        if seeds.is_empty() {
            return Err(Error::SeedManifestMissing);
        }
        Ok(seeds[rand::random_range(0..seeds.len())])
    }

    pub fn load(path: &Path) -> std::io::Result<Self> {
        let file = std::fs::File::open(path)?;
        serde_json::from_reader(std::io::BufReader::new(file)).map_err(std::io::Error::other)
    }

    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(std::io::BufWriter::new(file), self)
            .map_err(std::io::Error::other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest() -> SeedManifest {
        let mut manifest = SeedManifest::default();
        manifest.practice.insert("easy".to_string(), vec![1, 2, 3]);
        manifest.challenge.insert("easy".to_string(), vec![2, 3]);
        manifest.targets.insert("easy".to_string(), 800);
        manifest
    }

    #[test]
    fn samples_only_from_the_requested_pool() {
        let manifest = manifest();
        for _ in 0..20 {
            let seed = manifest.sample(Mode::Challenge, Tier::Easy).unwrap();
            assert!([2, 3].contains(&seed));
        }
    }

    #[test]
    fn missing_pools_surface_the_manifest_error() {
        let manifest = manifest();
        assert_eq!(
            manifest.sample(Mode::Practice, Tier::Hard),
            Err(Error::SeedManifestMissing),
        );
    }

    #[test]
    fn targets_resolve_by_tier() {
        assert_eq!(manifest().target(Tier::Easy), Some(800));
        assert_eq!(manifest().target(Tier::Hard), None);
    }
}
