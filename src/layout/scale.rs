//! Value-to-pixel scales shared by the views.

/// Affine map from `domain` to `range`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
	pub domain: (f64, f64),
	pub range: (f64, f64),
}

impl LinearScale {
	pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
		Self { domain, range }
	}

	pub fn apply(&self, x: f64) -> f64 {
		let (d0, d1) = self.domain;
		let (r0, r1) = self.range;
		if d1 == d0 {
			return (r0 + r1) / 2.0;
		}
		r0 + (x - d0) / (d1 - d0) * (r1 - r0)
	}
}

/// Base-10 logarithmic map. Inputs below `f64::MIN_POSITIVE` are clamped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LogScale {
	log_domain: (f64, f64),
	pub range: (f64, f64),
}

impl LogScale {
	pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
		Self {
			log_domain: (clamp_positive(domain.0).log10(), clamp_positive(domain.1).log10()),
			range,
		}
	}

	/// Scale over the extent of `values`, or `None` when there are none.
	pub fn from_values(values: impl IntoIterator<Item = f64>, range: (f64, f64)) -> Option<Self> {
		let (min, max) = values
			.into_iter()
			.map(clamp_positive)
			.fold(None, |acc: Option<(f64, f64)>, v| match acc {
				None => Some((v, v)),
				Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
			})?;
		Some(Self::new((min, max), range))
	}

	pub fn apply(&self, x: f64) -> f64 {
		LinearScale::new(self.log_domain, self.range).apply(clamp_positive(x).log10())
	}
}

/// Smallest positive normal value stands in for zero and negatives.
pub fn clamp_positive(x: f64) -> f64 {
	if x < f64::MIN_POSITIVE {
		f64::MIN_POSITIVE
	} else {
		x
	}
}

/// Piecewise-constant map: `x < thresholds[i]` selects `outputs[i]`.
#[derive(Clone, Debug, PartialEq)]
pub struct ThresholdScale<T> {
	thresholds: Vec<f64>,
	outputs: Vec<T>,
}

impl<T: Copy> ThresholdScale<T> {
	/// `outputs` must hold one more entry than `thresholds`.
	pub fn new(thresholds: Vec<f64>, outputs: Vec<T>) -> Self {
		debug_assert_eq!(outputs.len(), thresholds.len() + 1);
		Self {
			thresholds,
			outputs,
		}
	}

	pub fn apply(&self, x: f64) -> T {
		let bucket = self.thresholds.iter().take_while(|&&t| t <= x).count();
		self.outputs[bucket.min(self.outputs.len() - 1)]
	}
}

/// Shade index by independent E-value: 2 for the strongest hits, 0 for the weakest.
pub fn evalue_shade() -> ThresholdScale<usize> {
	ThresholdScale::new(vec![1e-6, 1e-3], vec![2, 1, 0])
}

/// Equal-width bands, one per label.
#[derive(Clone, Debug, PartialEq)]
pub struct BandScale {
	pub labels: Vec<String>,
	pub bandwidth: f64,
}

impl BandScale {
	pub fn new(labels: Vec<String>, bandwidth: f64) -> Self {
		Self { labels, bandwidth }
	}

	pub fn position(&self, index: usize) -> f64 {
		index as f64 * self.bandwidth
	}

	/// Band centre, where axis ticks sit.
	pub fn center(&self, index: usize) -> f64 {
		self.position(index) + self.bandwidth / 2.0
	}

	pub fn extent(&self) -> f64 {
		self.labels.len() as f64 * self.bandwidth
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn linear_maps_endpoints() {
		let scale = LinearScale::new((0.0, 200.0), (5.0, 405.0));
		assert_eq!(scale.apply(0.0), 5.0);
		assert_eq!(scale.apply(200.0), 405.0);
		assert_eq!(scale.apply(100.0), 205.0);
	}

	#[test]
	fn log_scale_spans_range_over_decades() {
		let scale = LogScale::from_values([1e-10, 1e-5, 1.0], (50.0, 250.0)).unwrap();
		assert!((scale.apply(1e-10) - 50.0).abs() < 1e-9);
		assert!((scale.apply(1e-5) - 150.0).abs() < 1e-9);
		assert!((scale.apply(1.0) - 250.0).abs() < 1e-9);
	}

	#[test]
	fn log_scale_clamps_zero() {
		let scale = LogScale::from_values([0.0, 1.0], (50.0, 250.0)).unwrap();
		assert!((scale.apply(0.0) - 50.0).abs() < 1e-9);
		assert!(scale.apply(0.0).is_finite());
	}

	#[test]
	fn degenerate_log_domain_maps_to_midpoint() {
		let scale = LogScale::from_values([1e-3, 1e-3], (50.0, 250.0)).unwrap();
		assert_eq!(scale.apply(1e-3), 150.0);
		assert!(LogScale::from_values(std::iter::empty(), (0.0, 1.0)).is_none());
	}

	#[test]
	fn evalue_shades_follow_thresholds() {
		let shade = evalue_shade();
		assert_eq!(shade.apply(0.0), 2);
		assert_eq!(shade.apply(1e-7), 2);
		assert_eq!(shade.apply(1e-6), 1);
		assert_eq!(shade.apply(5e-4), 1);
		assert_eq!(shade.apply(1e-3), 0);
		assert_eq!(shade.apply(10.0), 0);
	}

	#[test]
	fn band_positions_are_contiguous() {
		let band = BandScale::new(vec!["a".into(), "b".into(), "c".into()], 30.0);
		assert_eq!(band.position(2), 60.0);
		assert_eq!(band.center(0), 15.0);
		assert_eq!(band.extent(), 90.0);
	}
}
