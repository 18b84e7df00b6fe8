use crate::error::{Result, TextureError};
use crate::pcg::Pcg32;

/// Keeps every feature's denominator strictly positive, even for a zero divisor.
const DENOMINATOR_BIAS: f32 = 2.08;
const DIVISOR_SCALE: f32 = 5.0;

/// One randomly placed ripple source contributing a sine term to every texel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Feature {
    pub position_x: f32,
    pub position_y: f32,
    pub frequency_divisor: f32,
}

impl Feature {
    pub fn new(position_x: f32, position_y: f32, frequency_divisor: f32) -> Self {
        Feature {
            position_x,
            position_y,
            frequency_divisor,
        }
    }

    /// Contribution of this feature at column `x`, row `y`, always in `[-1, 1]`
    pub fn term(&self, x: f32, y: f32) -> f32 {
        let dx = x - self.position_x;
        let dy = y - self.position_y;
        ((dx * dx + dy * dy) / (DENOMINATOR_BIAS + DIVISOR_SCALE * self.frequency_divisor)).sin()
    }
}

/// Ordered set of features, fixed once drawn
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureSet {
    features: Vec<Feature>,
}

impl FeatureSet {
    pub fn new(features: Vec<Feature>) -> Self {
        FeatureSet { features }
    }

    /// Draw `count` features from the stream
    ///
    /// Each feature consumes three draws in order: x, y, then frequency
    /// divisor, each scaled by `grid_size`.
    pub fn generate(grid_size: usize, count: usize, rng: &mut Pcg32) -> Self {
        let scale = grid_size as f32;
        let features = (0..count)
            .map(|_| {
                let position_x = rng.next_f32() * scale;
                let position_y = rng.next_f32() * scale;
                let frequency_divisor = rng.next_f32() * scale;
                Feature::new(position_x, position_y, frequency_divisor)
            })
            .collect();
        FeatureSet { features }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter()
    }

    /// Mean of all feature terms at the given texel, 0 for an empty set
    pub fn evaluate(&self, x: f32, y: f32) -> f32 {
        if self.features.is_empty() {
            return 0.0;
        }
        let sum: f32 = self.features.iter().map(|f| f.term(x, y)).sum();
        sum / self.features.len() as f32
    }
}

/// Square, row-major grid of heights in `[-1, 1]`
#[derive(Debug, Clone, PartialEq)]
pub struct HeightField {
    size: usize,
    values: Vec<f32>,
}

/// Reject sizes that are zero or whose RGBA byte count would overflow `usize`
pub fn validate_grid_size(size: usize) -> Result<usize> {
    if size == 0 {
        return Err(TextureError::InvalidConfig(
            "grid size must be greater than zero".to_string(),
        ));
    }
    size.checked_mul(size)
        .and_then(|cells| cells.checked_mul(4))
        .map(|_| size * size)
        .ok_or_else(|| TextureError::InvalidConfig(format!("grid size {} is too large", size)))
}

impl HeightField {
    /// Draw a fresh feature set from `rng` and evaluate it over the grid
    pub fn synthesize(grid_size: usize, feature_count: usize, rng: &mut Pcg32) -> Result<Self> {
        validate_grid_size(grid_size)?;
        let features = FeatureSet::generate(grid_size, feature_count, rng);
        log::debug!("Drew {} features for a {}x{} grid", features.len(), grid_size, grid_size);
        Self::from_features(grid_size, &features)
    }

    /// Evaluate a known feature set over a `grid_size` square grid
    pub fn from_features(grid_size: usize, features: &FeatureSet) -> Result<Self> {
        let cells = validate_grid_size(grid_size)?;
        let mut values = Vec::with_capacity(cells);
        for row in 0..grid_size {
            for col in 0..grid_size {
                values.push(features.evaluate(col as f32, row as f32));
            }
        }
        Ok(HeightField {
            size: grid_size,
            values,
        })
    }

    /// Wrap an existing row-major buffer, e.g. a synthetic test surface
    pub fn from_values(size: usize, values: Vec<f32>) -> Result<Self> {
        let cells = validate_grid_size(size)?;
        if values.len() != cells {
            return Err(TextureError::InvalidConfig(format!(
                "expected {} height values for a {}x{} grid, got {}",
                cells,
                size,
                size,
                values.len()
            )));
        }
        Ok(HeightField { size, values })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn width(&self) -> usize {
        self.size
    }

    pub fn height(&self) -> usize {
        self.size
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x < self.size && y < self.size {
            Some(self.values[y * self.size + x])
        } else {
            None
        }
    }

    /// Read the height at column `x`, row `y`, treating the grid as a torus
    ///
    /// Coordinates outside `[0, size)` wrap to the opposite edge, so the
    /// field tiles seamlessly.
    pub fn sample(&self, x: i64, y: i64) -> f32 {
        let size = self.size as i64;
        let x = x.rem_euclid(size) as usize;
        let y = y.rem_euclid(size) as usize;
        self.values[y * self.size + x]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_origin_feature() -> FeatureSet {
        FeatureSet::new(vec![Feature::new(0.0, 0.0, 0.0)])
    }

    #[test]
    fn test_generate_consumes_stream_in_order() {
        let mut rng = Pcg32::new(123456789);
        let features = FeatureSet::generate(1024, 3, &mut rng);

        let mut reference = Pcg32::new(123456789);
        for feature in features.iter() {
            assert_eq!(feature.position_x, reference.next_f32() * 1024.0);
            assert_eq!(feature.position_y, reference.next_f32() * 1024.0);
            assert_eq!(feature.frequency_divisor, reference.next_f32() * 1024.0);
        }
        assert_eq!(features.len(), 3);
    }

    #[test]
    fn test_features_within_grid() {
        let mut rng = Pcg32::new(11);
        let features = FeatureSet::generate(64, 200, &mut rng);
        for f in features.iter() {
            for v in [f.position_x, f.position_y, f.frequency_divisor] {
                assert!((0.0..=64.0).contains(&v), "feature component {} outside grid", v);
            }
        }
    }

    #[test]
    fn test_single_feature_scenario() {
        let field = HeightField::from_features(4, &single_origin_feature()).unwrap();

        let expected = |x: f32, y: f32| ((x * x + y * y) / 2.08f32).sin();

        assert_eq!(field.get(0, 0), Some(0.0));
        assert_eq!(field.get(1, 0), Some(expected(1.0, 0.0)));
        assert_eq!(field.get(1, 1), Some(expected(1.0, 1.0)));
        assert_eq!(field.get(3, 2), Some(expected(3.0, 2.0)));
        assert!((field.get(1, 0).unwrap() - 0.4625).abs() < 1e-3);
        assert!((field.get(1, 1).unwrap() - 0.8201).abs() < 1e-3);
    }

    #[test]
    fn test_row_major_layout() {
        let features = FeatureSet::new(vec![Feature::new(0.0, 0.0, 1.0)]);
        let field = HeightField::from_features(8, &features).unwrap();
        assert_eq!(field.values()[8], field.get(0, 1).unwrap());
        assert_eq!(field.values()[1], field.get(1, 0).unwrap());
    }

    #[test]
    fn test_bounded_values() {
        let mut rng = Pcg32::new(123456789);
        let field = HeightField::synthesize(32, 25, &mut rng).unwrap();
        assert_eq!(field.values().len(), 32 * 32);
        for &v in field.values() {
            assert!(v.abs() <= 1.0, "height {} out of bounds", v);
        }
    }

    #[test]
    fn test_zero_features_is_flat() {
        let mut rng = Pcg32::new(1);
        let field = HeightField::synthesize(16, 0, &mut rng).unwrap();
        assert!(field.values().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_synthesis_is_deterministic() {
        let a = HeightField::synthesize(16, 10, &mut Pcg32::new(5)).unwrap();
        let b = HeightField::synthesize(16, 10, &mut Pcg32::new(5)).unwrap();
        let c = HeightField::synthesize(16, 10, &mut Pcg32::new(6)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_zero_grid_size_rejected() {
        let mut rng = Pcg32::new(1);
        let result = HeightField::synthesize(0, 10, &mut rng);
        assert!(matches!(result, Err(TextureError::InvalidConfig(_))));
    }

    #[test]
    fn test_overflowing_grid_size_rejected() {
        let result = validate_grid_size(usize::MAX / 2);
        assert!(matches!(result, Err(TextureError::InvalidConfig(_))));
    }

    #[test]
    fn test_from_values_length_checked() {
        assert!(HeightField::from_values(3, vec![0.0; 9]).is_ok());
        assert!(matches!(
            HeightField::from_values(3, vec![0.0; 8]),
            Err(TextureError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_toroidal_sampling() {
        let size = 5;
        let values: Vec<f32> = (0..size * size).map(|v| v as f32).collect();
        let field = HeightField::from_values(size, values).unwrap();
        let last = size as i64 - 1;

        for i in 0..size as i64 {
            assert_eq!(field.sample(-1, i), field.sample(last, i));
            assert_eq!(field.sample(size as i64, i), field.sample(0, i));
            assert_eq!(field.sample(i, -1), field.sample(i, last));
            assert_eq!(field.sample(i, size as i64), field.sample(i, 0));
        }
        assert_eq!(field.sample(2, 3), field.get(2, 3).unwrap());
        assert_eq!(field.get(5, 0), None);
    }
}
