//! Headless summary of a network and the frame it produces

use netviz_plot::core::layout::layer_y;
use netviz_plot::core::tessellate;
use netviz_plot::{LayerKind, NetworkModel, Session};
use std::io::{self, Write};

pub fn describe<W: Write>(network: &NetworkModel, out: &mut W) -> io::Result<()> {
    writeln!(out, "Network: {} ({} layers)", network.name(), network.len())?;
    for (index, layer) in network.iter().enumerate() {
        let geometry = match layer.kind() {
            LayerKind::Box {
                width,
                height,
                depth,
            } => format!("box {width:.1} x {height:.1} x {depth:.1}"),
            LayerKind::FullyConnected { neuron_count } => {
                format!("fully-connected, {neuron_count} neurons")
            }
        };
        let [r, g, b] = layer.color().to_array();
        writeln!(
            out,
            "  {index:>2}  {:<12} {geometry:<28} rgb({r:.2}, {g:.2}, {b:.2})  y={:.1}",
            layer.label(),
            layer_y(index)
        )?;
    }

    let frame = Session::new(network.clone()).compose_frame();
    let stats = frame.draw_list.stats();
    writeln!(
        out,
        "Frame: {} boxes, {} neurons, {} arrows, {} labels",
        stats.cuboids, stats.spheres, stats.cones, stats.labels
    )?;
    let batches = tessellate(&frame.draw_list);
    writeln!(
        out,
        "Geometry: {} triangles, {} line segments",
        batches.triangle_count(),
        batches.line_count()
    )
}
