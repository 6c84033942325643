use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The connection catalog: connection type -> subtype -> tipologías.
///
/// Mirrors the server's `conexiones.json`. BTreeMaps keep the display order
/// stable across fetches.
pub type CatalogStructure = BTreeMap<String, TypeEntry>;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TypeEntry {
    #[serde(default)]
    pub subtipos: BTreeMap<String, SubtypeEntry>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SubtypeEntry {
    #[serde(default)]
    pub tipologias: Vec<Tipologia>,
}

/// One connection tipología. `perfiles` is how many steel-profile fields the
/// request form needs; `plantilla` is the code template those profiles are
/// substituted into server-side.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Tipologia {
    pub nombre: String,
    #[serde(default)]
    pub plantilla: String,
    #[serde(default)]
    pub perfiles: u8,
}

/// A filled-in connection request, posted as the `/conexiones/crear` form.
/// `perfiles[i]` becomes the `perfil_{i+1}` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionRequest {
    pub proyecto_id: String,
    pub tipo: String,
    pub subtipo: String,
    pub tipologia_nombre: String,
    pub descripcion: String,
    pub perfiles: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_structure_parses_nested_shape() {
        let raw = r#"{
            "Momento": {
                "subtipos": {
                    "Viga-Columna": {
                        "tipologias": [
                            {"nombre": "Placa extrema", "plantilla": "PE-{p1}-{p2}", "perfiles": 2},
                            {"nombre": "Placa apernada"}
                        ]
                    }
                }
            },
            "Cortante": {"subtipos": {}}
        }"#;
        let catalog: CatalogStructure = serde_json::from_str(raw).unwrap();
        let tipologias = &catalog["Momento"].subtipos["Viga-Columna"].tipologias;
        assert_eq!(tipologias.len(), 2);
        assert_eq!(tipologias[0].perfiles, 2);
        assert_eq!(tipologias[1].plantilla, "");
        assert!(catalog["Cortante"].subtipos.is_empty());
    }
}
