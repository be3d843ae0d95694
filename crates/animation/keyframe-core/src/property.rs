//! Loading of Lottie-style animated properties into keyframe lists.
//!
//! Raw JSON is read through private serde schema structs; each value kind
//! implements [`PropertyValue`] to decode its own `s`/`e` arrays.

use log::debug;
use serde::Deserialize;
use serde_json::Value;

use crate::composition::Composition;
use crate::error::{KeyframeError, Result};
use crate::interp::easing::Easing;
use crate::interp::functions::lerp_f32;
use crate::keyframe::Keyframe;
use crate::value::{Color, DocumentData, GradientColor, Justification, ScaleXY, Vec2};

/// Public API: parse a Lottie-style animated property (`{"a":..,"k":..}`) into a
/// keyframe list ready for a driver.
///
/// Notes:
/// - `a: 0` (or a `k` that is not a keyframe array) gives one constant keyframe.
/// - The end frame of each keyframe is the start frame of the next one; a missing
///   end value is taken from the next keyframe's start value.
/// - A trailing keyframe without an end value is dropped when others exist,
///   except for stepped values (text), where it holds its start value.
/// - `h: 1` holds the start value for the whole keyframe.
pub fn parse_property<T: PropertyValue>(
    json: &Value,
    composition: &Composition,
    options: &DecodeOptions,
) -> Result<Vec<Keyframe<T>>> {
    let obj = json
        .as_object()
        .ok_or_else(|| KeyframeError::parse("animated property must be an object"))?;
    let k = obj
        .get("k")
        .ok_or_else(|| KeyframeError::parse("animated property has no \"k\" field"))?;
    let animated = match obj.get("a").and_then(Value::as_f64) {
        Some(a) => a != 0.0,
        None => is_keyframe_array(k),
    };
    if !animated {
        return Ok(vec![Keyframe::constant(T::decode(k, options)?)]);
    }
    let raws: Vec<RawKeyframe> = serde_json::from_value(k.clone())?;
    build_keyframes(&raws, composition, options)
}

/// [`parse_property`] from a JSON string.
pub fn parse_property_json<T: PropertyValue>(
    s: &str,
    composition: &Composition,
    options: &DecodeOptions,
) -> Result<Vec<Keyframe<T>>> {
    let json: Value = serde_json::from_str(s)?;
    parse_property(&json, composition, options)
}

/// Read the timing header (`ip`, `op`, `fr`) of an animation document. Other
/// fields are ignored.
pub fn parse_composition_json(s: &str) -> Result<Composition> {
    let comp: Composition = serde_json::from_str(s)?;
    if comp.frame_rate <= 0.0 {
        return Err(KeyframeError::parse(format!(
            "frame rate must be positive, got {}",
            comp.frame_rate
        )));
    }
    Ok(comp)
}

fn is_keyframe_array(k: &Value) -> bool {
    k.as_array()
        .and_then(|a| a.first())
        .and_then(Value::as_object)
        .is_some_and(|o| o.contains_key("t"))
}

fn build_keyframes<T: PropertyValue>(
    raws: &[RawKeyframe],
    composition: &Composition,
    options: &DecodeOptions,
) -> Result<Vec<Keyframe<T>>> {
    let mut out = Vec::with_capacity(raws.len());
    for (idx, raw) in raws.iter().enumerate() {
        let next = raws.get(idx + 1);
        let trailing = next.is_none() && raws.len() > 1;

        let Some(start_raw) = raw.s.as_ref() else {
            if trailing {
                debug!("dropping trailing keyframe at frame {} (no values)", raw.t);
                continue;
            }
            return Err(KeyframeError::parse(format!(
                "keyframe at frame {} has no start value",
                raw.t
            )));
        };
        let start = T::decode(start_raw, options)?;
        let hold = raw.h != 0;
        let end = if hold {
            Some(start.clone())
        } else {
            match (raw.e.as_ref(), next.and_then(|n| n.s.as_ref())) {
                (Some(e), _) => Some(T::decode(e, options)?),
                (None, Some(s)) => Some(T::decode(s, options)?),
                (None, None) => None,
            }
        };
        let end = match end {
            None if trailing && T::STEPPED => Some(start.clone()),
            None if trailing => {
                debug!("dropping trailing keyframe at frame {} (no end value)", raw.t);
                continue;
            }
            end => end,
        };

        let has_end = end.is_some();
        let mut keyframe = Keyframe::new(composition, raw.t, next.map(|n| n.t), start, end);
        if hold {
            keyframe = keyframe.with_easing(Easing::Linear);
        } else if has_end {
            keyframe = apply_easing(keyframe, raw, T::SPATIAL)?;
        }
        if T::SPATIAL {
            if let (Some(to), Some(ti)) = (raw.to.as_deref(), raw.ti.as_deref()) {
                keyframe = keyframe.with_tangents(vec2_from(to)?, vec2_from(ti)?);
            }
        }
        out.push(keyframe);
    }
    Ok(out)
}

fn apply_easing<T>(keyframe: Keyframe<T>, raw: &RawKeyframe, spatial: bool) -> Result<Keyframe<T>> {
    let (Some(o), Some(i)) = (raw.o.as_ref(), raw.i.as_ref()) else {
        return Ok(keyframe.with_easing(Easing::Linear));
    };
    if spatial && o.x.len() >= 2 && i.x.len() >= 2 {
        let x = Easing::cubic_bezier(o.x.at(0)?, o.y.at(0)?, i.x.at(0)?, i.y.at(0)?);
        let y = Easing::cubic_bezier(o.x.at(1)?, o.y.at(1)?, i.x.at(1)?, i.y.at(1)?);
        return Ok(keyframe.with_split_easing(x, y));
    }
    let easing = Easing::cubic_bezier(o.x.at(0)?, o.y.at(0)?, i.x.at(0)?, i.y.at(0)?);
    Ok(keyframe.with_easing(easing))
}

fn vec2_from(v: &[f32]) -> Result<Vec2> {
    match v {
        [x, y, ..] => Ok(Vec2::new(*x, *y)),
        _ => Err(KeyframeError::parse(format!(
            "expected at least 2 components, got {}",
            v.len()
        ))),
    }
}

/// Flatten a number or an array of numbers.
fn numbers(raw: &Value) -> Result<Vec<f32>> {
    match raw {
        Value::Number(n) => Ok(vec![n.as_f64().unwrap_or_default() as f32]),
        Value::Array(items) => items
            .iter()
            .map(|v| {
                v.as_f64()
                    .map(|n| n as f32)
                    .ok_or_else(|| KeyframeError::parse(format!("expected a number, got {v}")))
            })
            .collect(),
        other => Err(KeyframeError::parse(format!(
            "expected a number or array, got {other}"
        ))),
    }
}

/// Options that the property JSON alone does not carry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Number of color stops in a gradient array; 0 infers it from a colors-only array.
    pub gradient_color_stops: usize,
}

impl DecodeOptions {
    pub fn with_gradient_stops(stops: usize) -> Self {
        Self {
            gradient_color_stops: stops,
        }
    }
}

/// A value kind that can be decoded from keyframe JSON.
pub trait PropertyValue: Sized + Clone {
    /// Points carry per-axis easing and motion-path tangents.
    const SPATIAL: bool = false;

    /// Values never tween, so a trailing keyframe still holds a value worth showing.
    const STEPPED: bool = false;

    fn decode(raw: &Value, options: &DecodeOptions) -> Result<Self>;
}

impl PropertyValue for f32 {
    fn decode(raw: &Value, _options: &DecodeOptions) -> Result<Self> {
        numbers(raw)?
            .first()
            .copied()
            .ok_or_else(|| KeyframeError::parse("empty scalar value"))
    }
}

impl PropertyValue for i32 {
    fn decode(raw: &Value, options: &DecodeOptions) -> Result<Self> {
        Ok(f32::decode(raw, options)?.round() as i32)
    }
}

impl PropertyValue for Vec2 {
    const SPATIAL: bool = true;

    fn decode(raw: &Value, _options: &DecodeOptions) -> Result<Self> {
        vec2_from(&numbers(raw)?)
    }
}

/// Scale is authored in percent.
impl PropertyValue for ScaleXY {
    fn decode(raw: &Value, _options: &DecodeOptions) -> Result<Self> {
        match numbers(raw)?.as_slice() {
            [s] => Ok(ScaleXY::new(s / 100.0, s / 100.0)),
            [x, y, ..] => Ok(ScaleXY::new(x / 100.0, y / 100.0)),
            [] => Err(KeyframeError::parse("empty scale value")),
        }
    }
}

impl PropertyValue for Color {
    fn decode(raw: &Value, _options: &DecodeOptions) -> Result<Self> {
        let c = numbers(raw)?;
        let (r, g, b, a) = match c.as_slice() {
            [r, g, b] => (*r, *g, *b, 1.0),
            [r, g, b, a, ..] => (*r, *g, *b, *a),
            _ => {
                return Err(KeyframeError::parse(format!(
                    "color needs 3 or 4 components, got {}",
                    c.len()
                )))
            }
        };
        if [r, g, b].iter().any(|v| *v > 1.0) {
            debug!("color {c:?} looks 0-255; normalizing");
            let a = if a > 1.0 { a / 255.0 } else { a };
            return Ok(Color::rgba(r / 255.0, g / 255.0, b / 255.0, a));
        }
        Ok(Color::rgba(r, g, b, a))
    }
}

/// Flat `[p, r, g, b, ...]` color stops followed by optional `[p, opacity, ...]`
/// opacity stops. Opacity is sampled at each color stop position.
impl PropertyValue for GradientColor {
    fn decode(raw: &Value, options: &DecodeOptions) -> Result<Self> {
        let flat = numbers(raw)?;
        let stops = match options.gradient_color_stops {
            0 if flat.len() % 4 == 0 => flat.len() / 4,
            0 => {
                return Err(KeyframeError::parse(format!(
                    "cannot infer gradient stop count from {} values",
                    flat.len()
                )))
            }
            n => n,
        };
        if flat.len() < stops * 4 {
            return Err(KeyframeError::parse(format!(
                "gradient with {stops} stops needs {} values, got {}",
                stops * 4,
                flat.len()
            )));
        }
        let (color_part, opacity_part) = flat.split_at(stops * 4);
        let opacities: Vec<(f32, f32)> = opacity_part
            .chunks_exact(2)
            .map(|pair| (pair[0], pair[1]))
            .collect();
        let mut positions = Vec::with_capacity(stops);
        let mut colors = Vec::with_capacity(stops);
        for stop in color_part.chunks_exact(4) {
            let position = stop[0];
            positions.push(position);
            colors.push(Color::rgba(
                stop[1],
                stop[2],
                stop[3],
                opacity_at(&opacities, position),
            ));
        }
        GradientColor::new(positions, colors)
    }
}

/// Opacity at `position`, interpolated between the surrounding opacity stops.
fn opacity_at(stops: &[(f32, f32)], position: f32) -> f32 {
    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        return 1.0;
    };
    if position <= first.0 {
        return first.1;
    }
    if position >= last.0 {
        return last.1;
    }
    for pair in stops.windows(2) {
        let (p0, o0) = pair[0];
        let (p1, o1) = pair[1];
        if position >= p0 && position <= p1 {
            let span = p1 - p0;
            if span <= 0.0 {
                return o1;
            }
            return lerp_f32(o0, o1, (position - p0) / span);
        }
    }
    last.1
}

impl PropertyValue for DocumentData {
    const STEPPED: bool = true;

    fn decode(raw: &Value, options: &DecodeOptions) -> Result<Self> {
        let doc: RawDocument = serde_json::from_value(raw.clone())?;
        let color = |c: Option<Vec<f32>>, fallback: Color| -> Result<Color> {
            match c {
                Some(c) => Color::decode(&serde_json::json!(c), options),
                None => Ok(fallback),
            }
        };
        let justification = match doc.j {
            0 => Justification::LeftAlign,
            1 => Justification::RightAlign,
            2 => Justification::Center,
            other => {
                return Err(KeyframeError::parse(format!(
                    "unknown text justification {other}"
                )))
            }
        };
        Ok(DocumentData {
            text: doc.t,
            font_name: doc.f,
            size: doc.s,
            justification,
            tracking: doc.tr,
            line_height: doc.lh,
            baseline_shift: doc.ls,
            fill_color: color(doc.fc, Color::BLACK)?,
            stroke_color: color(doc.sc, Color::TRANSPARENT)?,
            stroke_width: doc.sw,
            stroke_over_fill: doc.of,
        })
    }
}

// ----- JSON schema (serde) -----

#[derive(Debug, Deserialize)]
struct RawKeyframe {
    #[serde(default)]
    t: f32,
    #[serde(default)]
    s: Option<Value>,
    #[serde(default)]
    e: Option<Value>,
    #[serde(default)]
    o: Option<RawHandle>,
    #[serde(default)]
    i: Option<RawHandle>,
    #[serde(default)]
    h: u8,
    #[serde(default)]
    to: Option<Vec<f32>>,
    #[serde(default)]
    ti: Option<Vec<f32>>,
}

/// Bezier easing handle; `x`/`y` are scalars or one entry per dimension.
#[derive(Debug, Deserialize)]
struct RawHandle {
    x: Scalarish,
    y: Scalarish,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalarish {
    One(f32),
    Many(Vec<f32>),
}

impl Scalarish {
    fn len(&self) -> usize {
        match self {
            Scalarish::One(_) => 1,
            Scalarish::Many(v) => v.len(),
        }
    }

    fn at(&self, idx: usize) -> Result<f32> {
        match self {
            Scalarish::One(v) => Ok(*v),
            Scalarish::Many(v) => v
                .get(idx)
                .or_else(|| v.first())
                .copied()
                .ok_or_else(|| KeyframeError::parse("empty easing handle")),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    t: String,
    #[serde(default)]
    f: String,
    #[serde(default)]
    s: f32,
    #[serde(default)]
    j: u8,
    #[serde(default)]
    tr: i32,
    #[serde(default)]
    lh: f32,
    #[serde(default)]
    ls: f32,
    #[serde(default)]
    fc: Option<Vec<f32>>,
    #[serde(default)]
    sc: Option<Vec<f32>>,
    #[serde(default)]
    sw: f32,
    #[serde(default)]
    of: bool,
}
