//! Assigns domain properties to cells.

use uom::si::{f64::Length, length::meter};

use super::{ConfigError, mesh::Mesh, tables::DomainEntry};

/// Slack on the upper bound of a domain, in metres.
const DOMAIN_TOLERANCE: f64 = 1e-9;

/// Per-cell properties taken from the owning domain, in SI units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellProperties {
    /// Index into the domain table.
    pub domain: usize,
    pub conductivity: f64,
    pub source_constant: f64,
    pub source_linear: f64,
    pub area: f64,
    pub perimeter: f64,
}

/// Resolves the owning domain of every cell.
///
/// A cell belongs to a domain when its node lies in `[start, end]`.
/// Overlapping domains resolve to the last match in table order.
///
/// # Errors
///
/// Returns [`ConfigError::UnresolvedCell`] for the first cell outside all domains.
pub fn resolve_cells(
    mesh: &Mesh,
    domains: &[DomainEntry],
) -> Result<Vec<CellProperties>, ConfigError> {
    mesh.cells()
        .iter()
        .map(|cell| -> Result<CellProperties, ConfigError> {
            let (index, domain) = domains
                .iter()
                .enumerate()
                .rev()
                .find(|(_, domain)| {
                    domain.start <= cell.position && cell.position <= domain.end + DOMAIN_TOLERANCE
                })
                .ok_or(ConfigError::UnresolvedCell {
                    index: cell.index,
                    position: Length::new::<meter>(cell.position),
                })?;

            Ok(CellProperties {
                domain: index,
                conductivity: domain.conductivity,
                source_constant: domain.source_constant,
                source_linear: domain.source_linear,
                area: domain.area,
                perimeter: domain.perimeter,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn entry(start: f64, end: f64, conductivity: f64) -> DomainEntry {
        DomainEntry {
            start,
            end,
            conductivity,
            source_constant: 0.0,
            source_linear: 0.0,
            area: 1.0,
            perimeter: 4.0,
            initial_temperature: 300.0,
        }
    }

    #[test]
    fn two_materials() {
        let mesh = Mesh::equidistant(0.0, 1.0, 5).unwrap();
        let domains = [entry(0.0, 0.5, 400.0), entry(0.5, 1.0, 15.0)];
        let properties = resolve_cells(&mesh, &domains).unwrap();

        let owners: Vec<usize> = properties.iter().map(|p| p.domain).collect();
        // The shared node at 0.5 goes to the later domain.
        assert_eq!(owners, [0, 0, 1, 1, 1]);
        assert_relative_eq!(properties[1].conductivity, 400.0);
        assert_relative_eq!(properties[4].conductivity, 15.0);
    }

    #[test]
    fn last_overlapping_domain_wins() {
        let mesh = Mesh::equidistant(0.0, 1.0, 3).unwrap();
        let domains = [entry(0.0, 1.0, 1.0), entry(0.4, 0.6, 2.0)];
        let properties = resolve_cells(&mesh, &domains).unwrap();
        assert_eq!(properties[1].domain, 1);
        assert_eq!(properties[0].domain, 0);
    }

    #[test]
    fn gap_leaves_cell_unresolved() {
        let mesh = Mesh::equidistant(0.0, 1.0, 5).unwrap();
        let domains = [entry(0.0, 0.3, 1.0), entry(0.6, 1.0, 1.0)];
        match resolve_cells(&mesh, &domains) {
            Err(ConfigError::UnresolvedCell { index, .. }) => assert_eq!(index, 2),
            other => panic!("expected UnresolvedCell, got {other:?}"),
        }
    }
}
