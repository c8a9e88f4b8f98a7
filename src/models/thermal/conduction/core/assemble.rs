//! Conduction and source terms of the discrete energy balance.

use super::{
    interface::CellInterfaces, mesh::Mesh, resolve::CellProperties, system::LinearSystem,
};

/// Fills `system` with the steady conduction balance of every cell.
///
/// The system is zeroed first, so calling this repeatedly on the same inputs
/// gives identical coefficients.
/// Per cell of width `Δx` and per unit area:
///
/// - each face contributes `k/δ` to the diagonal and `−k/δ` to its neighbour
/// - the linear source `S_p` subtracts `S_p·Δx` from the diagonal
/// - the constant source adds `S_c·Δx` to the right-hand side
///
/// # Panics
///
/// Panics if the slices are shorter than the mesh.
pub fn assemble(
    system: &mut LinearSystem,
    mesh: &Mesh,
    properties: &[CellProperties],
    interfaces: &[CellInterfaces],
) {
    system.reset();

    for cell in mesh.cells() {
        let props = &properties[cell.index];
        let faces = &interfaces[cell.index];
        let row = system.row_mut(cell.index);

        if let (Some(west), Some(face)) = (row.west, faces.west) {
            *west = -face.conductance();
            *row.center += face.conductance();
        }
        if let (Some(east), Some(face)) = (row.east, faces.east) {
            *east = -face.conductance();
            *row.center += face.conductance();
        }

        *row.center -= props.source_linear * cell.width;
        *row.rhs = props.source_constant * cell.width;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::thermal::conduction::core::interface::{Interpolation, interfaces};

    fn rod(count: usize, source_constant: f64, source_linear: f64) -> (Mesh, Vec<CellProperties>) {
        let mesh = Mesh::equidistant(0.0, 1.0, count).unwrap();
        let properties = vec![
            CellProperties {
                domain: 0,
                conductivity: 2.0,
                source_constant,
                source_linear,
                area: 1.0,
                perimeter: 4.0,
            };
            count
        ];
        (mesh, properties)
    }

    #[test]
    fn interior_rows_balance() {
        let (mesh, properties) = rod(5, 0.0, 0.0);
        let faces = interfaces(&mesh, &properties, Interpolation::Harmonic).unwrap();
        let mut system = LinearSystem::new(5);
        assemble(&mut system, &mesh, &properties, &faces);

        // k/δ = 2 / 0.25
        let row = system.row(2);
        assert_relative_eq!(row.west.unwrap(), -8.0);
        assert_relative_eq!(row.east.unwrap(), -8.0);
        assert_relative_eq!(row.center, 16.0);
        assert_eq!(row.rhs, 0.0);

        let first = system.row(0);
        assert_relative_eq!(first.center, 8.0);
        assert_relative_eq!(first.east.unwrap(), -8.0);

        // Without sources every row sums to zero.
        for i in 0..5 {
            let row = system.row(i);
            let sum = row.west.unwrap_or(0.0) + row.center + row.east.unwrap_or(0.0);
            assert_relative_eq!(sum, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn sources_scale_with_width() {
        let (mesh, properties) = rod(5, 100.0, -3.0);
        let faces = interfaces(&mesh, &properties, Interpolation::Arithmetic).unwrap();
        let mut system = LinearSystem::new(5);
        assemble(&mut system, &mesh, &properties, &faces);

        assert_relative_eq!(system.row(0).rhs, 12.5);
        assert_relative_eq!(system.row(2).rhs, 25.0);
        assert_relative_eq!(system.row(2).center, 16.0 + 0.75);
        assert_relative_eq!(system.row(4).center, 8.0 + 0.375);
    }

    #[test]
    fn reassembly_is_idempotent() {
        let (mesh, properties) = rod(7, 5.0, -1.0);
        let faces = interfaces(&mesh, &properties, Interpolation::Harmonic).unwrap();

        let mut once = LinearSystem::new(7);
        assemble(&mut once, &mesh, &properties, &faces);

        let mut twice = once.clone();
        *twice.row_mut(3).center += 1.0e6;
        assemble(&mut twice, &mesh, &properties, &faces);
        assemble(&mut twice, &mesh, &properties, &faces);

        assert_eq!(once, twice);
    }
}
