//! Tagged JSON form of `Steric` values: `{"type": "Polygon", "coordinates": [...]}`.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use steric::{Coord, Steric};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    Point([f64; 2]),
    LineString(Vec<[f64; 2]>),
    Polygon(Vec<Vec<[f64; 2]>>),
    Collection(Vec<Geometry>),
}

fn xy(p: &Coord) -> [f64; 2] {
    [p.x, p.y]
}

fn coords(pts: &[[f64; 2]]) -> Vec<Coord> {
    pts.iter().map(|[x, y]| Coord::new(*x, *y)).collect()
}

impl From<&Steric> for Geometry {
    fn from(g: &Steric) -> Self {
        match g {
            Steric::Point(p) => Geometry::Point(xy(p)),
            Steric::Line(pts) => Geometry::LineString(pts.iter().map(xy).collect()),
            Steric::Polygon(rings) => {
                Geometry::Polygon(rings.iter().map(|r| r.iter().map(xy).collect()).collect())
            }
            Steric::Collection(items) => Geometry::Collection(items.iter().map(Geometry::from).collect()),
        }
    }
}

impl From<&Geometry> for Steric {
    fn from(g: &Geometry) -> Self {
        match g {
            Geometry::Point([x, y]) => Steric::point(*x, *y),
            Geometry::LineString(pts) => Steric::Line(coords(pts)),
            Geometry::Polygon(rings) => Steric::Polygon(rings.iter().map(|r| coords(r)).collect()),
            Geometry::Collection(items) => Steric::Collection(items.iter().map(Steric::from).collect()),
        }
    }
}

/// Parse inline JSON, or read it from a file when the argument starts with `@`.
pub fn parse_arg(arg: &str) -> Result<Steric> {
    let text = match arg.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?,
        None => arg.to_string(),
    };
    let g: Geometry = serde_json::from_str(&text).with_context(|| format!("parsing geometry {text:?}"))?;
    Ok(Steric::from(&g))
}

pub fn to_value(g: &Steric) -> Result<serde_json::Value> {
    Ok(serde_json::to_value(Geometry::from(g))?)
}
