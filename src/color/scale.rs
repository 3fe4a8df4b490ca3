use std::fmt;
use std::str::FromStr;

use super::{ConfigurationError, Rgb};

const YL_OR_RD: [u32; 9] = [
	0xffffcc, 0xffeda0, 0xfed976, 0xfeb24c, 0xfd8d3c, 0xfc4e2a, 0xe31a1c, 0xbd0026, 0x800026,
];
const RD_PU: [u32; 9] = [
	0xfff7f3, 0xfde0dd, 0xfcc5c0, 0xfa9fb5, 0xf768a1, 0xdd3497, 0xae017e, 0x7a0177, 0x49006a,
];
const PU_BU: [u32; 9] = [
	0xfff7fb, 0xece7f2, 0xd0d1e6, 0xa6bddb, 0x74a9cf, 0x3690c0, 0x0570b0, 0x045a8d, 0x023858,
];
const OR_RD: [u32; 9] = [
	0xfff7ec, 0xfee8c8, 0xfdd49e, 0xfdbb84, 0xfc8d59, 0xef6548, 0xd7301f, 0xb30000, 0x7f0000,
];
const BU_PU: [u32; 9] = [
	0xf7fcfd, 0xe0ecf4, 0xbfd3e6, 0x9ebcda, 0x8c96c6, 0x8c6bb1, 0x88419d, 0x810f7c, 0x4d004b,
];
const VIRIDIS: [u32; 9] = [
	0x440154, 0x472d7b, 0x3b528b, 0x2c728e, 0x21918c, 0x28ae80, 0x5ec962, 0xaddc30, 0xfde725,
];
const PLASMA: [u32; 9] = [
	0x0d0887, 0x4c02a1, 0x7e03a8, 0xa92395, 0xcc4778, 0xe56b5d, 0xf89540, 0xfdc328, 0xf0f921,
];
// black -> red -> yellow -> white with uneven breakpoints
const HOT: [(f64, u32); 4] = [
	(0.0, 0x0b0000),
	(0.365079, 0xff0000),
	(0.746032, 0xffff00),
	(1.0, 0xffffff),
];

/// Named map from `[0, 1]` to a color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ColorScale {
	/// Yellow-Orange-Red.
	#[default]
	YlOrRd,
	/// Red-Purple.
	RdPu,
	/// Purple-Blue.
	PuBu,
	/// Orange-Red.
	OrRd,
	/// Blue-Purple.
	BuPu,
	/// Black-red-yellow-white heat.
	Hot,
	/// Perceptually uniform purple-green-yellow.
	Viridis,
	/// Perceptually uniform blue-magenta-yellow.
	Plasma,
}

impl ColorScale {
	/// Every scale, in menu order.
	pub const ALL: [ColorScale; 8] = [
		ColorScale::YlOrRd,
		ColorScale::RdPu,
		ColorScale::PuBu,
		ColorScale::OrRd,
		ColorScale::BuPu,
		ColorScale::Hot,
		ColorScale::Viridis,
		ColorScale::Plasma,
	];

	/// Identifier used in the UI and on the command line.
	pub fn name(self) -> &'static str {
		match self {
			ColorScale::YlOrRd => "YlOrRd",
			ColorScale::RdPu => "RdPu",
			ColorScale::PuBu => "PuBu",
			ColorScale::OrRd => "OrRd",
			ColorScale::BuPu => "BuPu",
			ColorScale::Hot => "hot",
			ColorScale::Viridis => "viridis",
			ColorScale::Plasma => "plasma",
		}
	}

	/// Human readable name for menus.
	pub fn label(self) -> &'static str {
		match self {
			ColorScale::YlOrRd => "Yellow-Orange-Red",
			ColorScale::RdPu => "Red-Purple",
			ColorScale::PuBu => "Purple-Blue",
			ColorScale::OrRd => "Orange-Red",
			ColorScale::BuPu => "Blue-Purple",
			ColorScale::Hot => "Heat",
			ColorScale::Viridis => "Viridis",
			ColorScale::Plasma => "Plasma",
		}
	}

	/// Color at `t`, clamped to `[0, 1]`.
	pub fn sample(self, t: f64) -> Rgb {
		let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
		match self {
			ColorScale::YlOrRd => uniform(&YL_OR_RD, t),
			ColorScale::RdPu => uniform(&RD_PU, t),
			ColorScale::PuBu => uniform(&PU_BU, t),
			ColorScale::OrRd => uniform(&OR_RD, t),
			ColorScale::BuPu => uniform(&BU_PU, t),
			ColorScale::Hot => positioned(&HOT, t),
			ColorScale::Viridis => uniform(&VIRIDIS, t),
			ColorScale::Plasma => uniform(&PLASMA, t),
		}
	}
}

fn unpack(hex: u32) -> [f64; 3] {
	[
		((hex >> 16) & 0xff) as f64,
		((hex >> 8) & 0xff) as f64,
		(hex & 0xff) as f64,
	]
}

fn lerp(a: u32, b: u32, f: f64) -> Rgb {
	let (a, b) = (unpack(a), unpack(b));
	let mix = |k: usize| (a[k] + (b[k] - a[k]) * f).round() as u8;
	Rgb(mix(0), mix(1), mix(2))
}

fn uniform(stops: &[u32], t: f64) -> Rgb {
	let pos = t * (stops.len() - 1) as f64;
	let lo = (pos.floor() as usize).min(stops.len() - 2);
	lerp(stops[lo], stops[lo + 1], pos - lo as f64)
}

fn positioned(stops: &[(f64, u32)], t: f64) -> Rgb {
	let hi = stops
		.iter()
		.position(|&(at, _)| at >= t)
		.unwrap_or(stops.len() - 1)
		.max(1);
	let ((a_at, a), (b_at, b)) = (stops[hi - 1], stops[hi]);
	lerp(a, b, (t - a_at) / (b_at - a_at))
}

impl fmt::Display for ColorScale {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for ColorScale {
	type Err = ConfigurationError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		ColorScale::ALL
			.into_iter()
			.find(|scale| scale.name() == s)
			.ok_or_else(|| ConfigurationError::UnknownColorScale(s.to_string()))
	}
}
