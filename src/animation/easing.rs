//! Easing curves for tweens and scroll-bound animations
//!
//! Names follow the GSAP string syntax (`power2.out`, `back.out(1.5)`,
//! `elastic.out(1, 0.5)`) so presets and config files read the same way
//! the page authors write them.

use std::f32::consts::TAU;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::MotionError;

/// Which end of the curve is shaped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EaseMode {
    /// Slow start, accelerate
    In,
    /// Fast start, decelerate
    Out,
    /// Slow at both ends
    InOut,
}

/// Easing function types
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Ease {
    /// Linear interpolation (`none`)
    #[default]
    None,
    /// Polynomial curve, `degree` 1..=4 maps to exponent 2..=5
    Power { degree: u8, mode: EaseMode },
    /// Overshoots past the target and settles back
    Back { mode: EaseMode, overshoot: f32 },
    /// Decaying oscillation around the target
    Elastic { mode: EaseMode, amplitude: f32, period: f32 },
}

pub const DEFAULT_BACK_OVERSHOOT: f32 = 1.70158;

impl Ease {
    pub const fn power(degree: u8, mode: EaseMode) -> Self {
        Ease::Power { degree, mode }
    }

    pub const fn back_out(overshoot: f32) -> Self {
        Ease::Back {
            mode: EaseMode::Out,
            overshoot,
        }
    }

    pub const fn elastic_out(amplitude: f32, period: f32) -> Self {
        Ease::Elastic {
            mode: EaseMode::Out,
            amplitude,
            period,
        }
    }

    /// Apply the curve to a value t in range [0, 1]
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match *self {
            Ease::None => t,
            Ease::Power { degree, mode } => {
                let exponent = i32::from(degree.clamp(1, 4)) + 1;
                with_mode(t, mode, |p| p.powi(exponent))
            }
            Ease::Back { mode, overshoot } => {
                with_mode(t, mode, |p| p * p * ((overshoot + 1.0) * p - overshoot))
            }
            Ease::Elastic {
                mode,
                amplitude,
                period,
            } => {
                let a = amplitude.max(1.0);
                let period = if period > 0.0 { period } else { 0.3 };
                let period = period / amplitude.min(1.0).max(f32::EPSILON);
                let shift = period / TAU * (1.0 / a).asin();
                let out = move |p: f32| {
                    if p >= 1.0 {
                        1.0
                    } else {
                        a * 2f32.powf(-10.0 * p) * ((p - shift) * TAU / period).sin() + 1.0
                    }
                };
                match mode {
                    EaseMode::Out => out(t),
                    EaseMode::In => 1.0 - out(1.0 - t),
                    EaseMode::InOut => {
                        if t < 0.5 {
                            (1.0 - out(1.0 - t * 2.0)) / 2.0
                        } else {
                            0.5 + out((t - 0.5) * 2.0) / 2.0
                        }
                    }
                }
            }
        }
    }
}

/// Build out / in-out variants from an ease-in curve
fn with_mode(t: f32, mode: EaseMode, ease_in: impl Fn(f32) -> f32) -> f32 {
    match mode {
        EaseMode::In => ease_in(t),
        EaseMode::Out => 1.0 - ease_in(1.0 - t),
        EaseMode::InOut => {
            if t < 0.5 {
                ease_in(t * 2.0) / 2.0
            } else {
                1.0 - ease_in((1.0 - t) * 2.0) / 2.0
            }
        }
    }
}

impl FromStr for Ease {
    type Err = MotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let invalid = || MotionError::InvalidEase(raw.to_string());

        let (head, args) = match raw.find('(') {
            Some(open) => {
                let close = raw.rfind(')').filter(|&c| c > open).ok_or_else(invalid)?;
                let args = raw[open + 1..close]
                    .split(',')
                    .filter(|a| !a.trim().is_empty())
                    .map(|a| a.trim().parse::<f32>().map_err(|_| invalid()))
                    .collect::<Result<Vec<_>, _>>()?;
                (&raw[..open], args)
            }
            None => (raw, Vec::new()),
        };

        let (family, mode) = match head.split_once('.') {
            Some((family, mode)) => {
                let mode = match mode {
                    "in" => EaseMode::In,
                    "out" => EaseMode::Out,
                    "inOut" => EaseMode::InOut,
                    _ => return Err(invalid()),
                };
                (family, mode)
            }
            None => (head, EaseMode::Out),
        };

        match family {
            "none" | "linear" => Ok(Ease::None),
            "power1" | "quad" => Ok(Ease::power(1, mode)),
            "power2" | "cubic" => Ok(Ease::power(2, mode)),
            "power3" | "quart" => Ok(Ease::power(3, mode)),
            "power4" | "quint" | "strong" => Ok(Ease::power(4, mode)),
            "back" => Ok(Ease::Back {
                mode,
                overshoot: args.first().copied().unwrap_or(DEFAULT_BACK_OVERSHOOT),
            }),
            "elastic" => Ok(Ease::Elastic {
                mode,
                amplitude: args.first().copied().unwrap_or(1.0),
                period: args.get(1).copied().unwrap_or(0.3),
            }),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Ease {
    type Error = MotionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Ease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = |m: EaseMode| match m {
            EaseMode::In => "in",
            EaseMode::Out => "out",
            EaseMode::InOut => "inOut",
        };
        match *self {
            Ease::None => write!(f, "none"),
            Ease::Power { degree, mode: m } => write!(f, "power{}.{}", degree, mode(m)),
            Ease::Back { mode: m, overshoot } => write!(f, "back.{}({})", mode(m), overshoot),
            Ease::Elastic {
                mode: m,
                amplitude,
                period,
            } => write!(f, "elastic.{}({}, {})", mode(m), amplitude, period),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODES: [EaseMode; 3] = [EaseMode::In, EaseMode::Out, EaseMode::InOut];

    #[test]
    fn test_ease_bounds() {
        let mut eases = vec![Ease::None, Ease::back_out(1.5), Ease::elastic_out(1.0, 0.5)];
        for degree in 1..=4 {
            for mode in MODES {
                eases.push(Ease::power(degree, mode));
            }
        }
        for ease in eases {
            assert!(ease.apply(0.0).abs() < 0.01, "{} should start near 0", ease);
            assert!((ease.apply(1.0) - 1.0).abs() < 0.01, "{} should end near 1", ease);
        }
    }

    #[test]
    fn test_power_monotonic() {
        for degree in 1..=4 {
            for mode in MODES {
                let ease = Ease::power(degree, mode);
                let mut prev = 0.0;
                for i in 0..=100 {
                    let v = ease.apply(i as f32 / 100.0);
                    assert!(v >= prev - 0.001, "{} should be monotonic", ease);
                    prev = v;
                }
            }
        }
    }

    #[test]
    fn test_power_out_decelerates() {
        let ease = Ease::power(2, EaseMode::Out);
        assert!(ease.apply(0.25) > 0.25);
        assert!((ease.apply(0.5) - 0.875).abs() < 1e-5);
    }

    #[test]
    fn test_in_out_symmetric() {
        let ease = Ease::power(1, EaseMode::InOut);
        let v1 = ease.apply(0.25);
        let v2 = ease.apply(0.75);
        assert!((v1 + v2 - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_back_out_overshoots() {
        let ease = Ease::back_out(1.5);
        let peak = (0..=100)
            .map(|i| ease.apply(i as f32 / 100.0))
            .fold(0.0f32, f32::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn test_elastic_oscillates() {
        let ease = Ease::elastic_out(1.0, 0.5);
        let above = (1..100).any(|i| ease.apply(i as f32 / 100.0) > 1.0);
        let below_after_peak = (50..100).any(|i| ease.apply(i as f32 / 100.0) < 1.0);
        assert!(above && below_after_peak);
    }

    #[test]
    fn test_ease_clamps_input() {
        assert_eq!(Ease::None.apply(-0.5), 0.0);
        assert_eq!(Ease::None.apply(1.5), 1.0);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("none".parse::<Ease>().unwrap(), Ease::None);
        assert_eq!(
            "power2.out".parse::<Ease>().unwrap(),
            Ease::power(2, EaseMode::Out)
        );
        assert_eq!(
            "power1.inOut".parse::<Ease>().unwrap(),
            Ease::power(1, EaseMode::InOut)
        );
        assert_eq!("power3".parse::<Ease>().unwrap(), Ease::power(3, EaseMode::Out));
        assert_eq!("back.out(1.5)".parse::<Ease>().unwrap(), Ease::back_out(1.5));
        assert_eq!(
            "back.in".parse::<Ease>().unwrap(),
            Ease::Back {
                mode: EaseMode::In,
                overshoot: DEFAULT_BACK_OVERSHOOT
            }
        );
        assert_eq!(
            "elastic.out(1, 0.5)".parse::<Ease>().unwrap(),
            Ease::elastic_out(1.0, 0.5)
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("wobble.out".parse::<Ease>().is_err());
        assert!("power2.sideways".parse::<Ease>().is_err());
        assert!("back.out(abc)".parse::<Ease>().is_err());
        assert!("back.out(1.5".parse::<Ease>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        let ease = Ease::back_out(2.5);
        assert_eq!(ease.to_string().parse::<Ease>().unwrap(), ease);
    }
}
