//! Human-readable console output.

use pmtlayout_logic::config::LayoutConfig;
use pmtlayout_logic::placement::Summary;

pub fn print_config(config: &LayoutConfig) {
    let sensor = &config.sensor;
    println!("Detector Dimensions (Lx,Ly,Lz): {} mm", config.box_dims);
    println!("PMT Physical Diameter: {:.2} mm", sensor.physical_diameter);
    println!(
        "PMT Active Diameter (for coverage): {:.2} mm",
        sensor.active_diameter
    );
    println!("Distance PMT Edge to Wall: {:.2} mm", sensor.standoff);
    println!(
        "Desired Photocoverage: {:.2}%",
        config.desired_coverage * 100.0
    );
    println!("Min PMT Edge to Face Edge Gap: {:.2} mm", sensor.edge_gap);
    println!("{}", "-".repeat(30));
}

pub fn print_summary(summary: &Summary) {
    print!("{}", format_summary(summary));
}

/// Render the placement summary block.
pub fn format_summary(summary: &Summary) -> String {
    let mut lines = vec![
        "--- Placement Summary ---".to_string(),
        format!("  total_pmts_placed: {}", summary.total_placed),
        format!("  desired_photocoverage: {:.4}", summary.desired_coverage),
        format!("  achieved_photocoverage: {:.4}", summary.achieved_coverage),
        format!("  target_pmt_count: {}", summary.target_count),
        format!("  max_physically_possible: {}", summary.max_possible),
        format!("  pmt_active_diameter_mm: {:.2}", summary.active_diameter),
        format!("  pmt_physical_diameter_mm: {:.2}", summary.physical_diameter),
        format!("  distance_edge_to_wall_mm: {:.2}", summary.standoff),
        format!("  min_pmt_edge_to_face_edge_gap_mm: {:.2}", summary.edge_gap),
        "  num_on_each_face:".to_string(),
    ];
    for wall in &summary.walls {
        lines.push(match &wall.grid {
            Some(grid) => format!(
                "    {}: {} / {} ({}×{} grid, pitch {:.1}×{:.1} mm)",
                wall.wall,
                wall.allocated,
                wall.capacity,
                grid.rows,
                grid.cols,
                grid.spacing[0],
                grid.spacing[1]
            ),
            None => format!("    {}: {} / {}", wall.wall, wall.allocated, wall.capacity),
        });
    }
    let mut text = lines.join("\n");
    text.push('\n');
    text
}
