use geo::{Geometry, MultiPolygon};
use geojson::{Feature, GeoJson, feature::Id};
use scene::CountryFeature;
use tracing::warn;

use crate::error::DecodeError;

fn feature_id(feature: &Feature) -> Option<String> {
    match &feature.id {
        Some(Id::String(s)) => Some(s.clone()),
        Some(Id::Number(n)) => Some(n.to_string()),
        None => None,
    }
}

fn feature_name(feature: &Feature) -> Option<String> {
    feature
        .property("name")
        .and_then(|v| v.as_str())
        .map(str::to_string)
}

fn feature_geometry(feature: Feature) -> Result<Option<MultiPolygon<f64>>, DecodeError> {
    let Some(geometry) = feature.geometry else {
        return Ok(None);
    };
    let geom: Geometry<f64> = geometry.value.try_into()?;
    Ok(match geom {
        Geometry::Polygon(p) => Some(p.into()),
        Geometry::MultiPolygon(m) => Some(m),
        _ => None,
    })
}

/// Decodes the world-country FeatureCollection.
///
/// Features without an id or with non-areal geometry are skipped. A feature
/// without geometry is kept with an empty `MultiPolygon`, so it can still be
/// offered (Antarctica relies on this).
pub fn decode_countries(payload: &str) -> Result<Vec<CountryFeature>, DecodeError> {
    let GeoJson::FeatureCollection(collection) = payload.parse::<GeoJson>()? else {
        return Err(DecodeError::NotAFeatureCollection);
    };

    let mut out = Vec::with_capacity(collection.features.len());
    for (index, feature) in collection.features.into_iter().enumerate() {
        let Some(id) = feature_id(&feature) else {
            warn!(index, "country feature without id, skipping");
            continue;
        };
        let name = feature_name(&feature).unwrap_or_else(|| id.clone());
        let had_geometry = feature.geometry.is_some();
        match feature_geometry(feature)? {
            Some(geometry) => out.push(CountryFeature::new(id, name, geometry)),
            None if !had_geometry => {
                out.push(CountryFeature::new(id, name, MultiPolygon::new(Vec::new())));
            }
            None => warn!(%id, "country geometry is not a polygon, skipping"),
        }
    }
    Ok(out)
}
