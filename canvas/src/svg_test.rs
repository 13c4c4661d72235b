use super::*;

#[test]
fn finish_wraps_body_in_svg_root() {
    let mut svg = SvgSurface::new(800.0, 500.0);
    svg.clear(800.0, 500.0, "#ffffff").expect("write");
    let doc = svg.finish();
    assert!(doc.starts_with("<svg "));
    assert!(doc.contains(r#"viewBox="0 0 800 500""#));
    assert!(doc.ends_with("</svg>"));
}

#[test]
fn clear_discards_previous_elements() {
    let mut svg = SvgSurface::new(100.0, 100.0);
    svg.stroke_line(Point::new(0.0, 0.0), Point::new(1.0, 1.0), &Stroke::solid("#000", 1.0))
        .expect("write");
    svg.clear(100.0, 100.0, "#fff").expect("write");
    assert!(!svg.body().contains("<line"));
}

#[test]
fn dashed_line_has_dasharray() {
    const DASH: [f64; 2] = [5.0, 3.0];
    let mut svg = SvgSurface::new(100.0, 100.0);
    let stroke = Stroke { color: "#f59e0b", width: 2.0, dash: &DASH };
    svg.stroke_line(Point::new(0.0, 0.0), Point::new(10.0, 0.0), &stroke)
        .expect("write");
    assert!(svg.body().contains(r#"stroke-dasharray="5 3""#));
    assert!(svg.body().contains(r##"stroke="#f59e0b""##));
}

#[test]
fn solid_line_has_no_dasharray() {
    let mut svg = SvgSurface::new(100.0, 100.0);
    svg.stroke_line(Point::new(0.0, 0.0), Point::new(10.0, 0.0), &Stroke::solid("#2563eb", 3.0))
        .expect("write");
    assert!(!svg.body().contains("stroke-dasharray"));
    assert!(svg.body().contains(r#"stroke-width="3""#));
}

#[test]
fn circle_has_single_fill_attribute() {
    let mut svg = SvgSurface::new(100.0, 100.0);
    svg.fill_circle(Point::new(5.0, 5.0), 6.0, "#10b981", &Stroke::solid("#ffffff", 2.0))
        .expect("write");
    let body = svg.body();
    assert_eq!(body.matches("fill=").count(), 1);
    assert!(body.contains(r##"fill="#10b981""##));
}

#[test]
fn boxes_use_two_decimal_coordinates() {
    let mut svg = SvgSurface::new(100.0, 100.0);
    let rect = Rect { x: 1.0, y: 2.5, width: 3.333, height: 4.0 };
    svg.fill_box(rect, "red").expect("write");
    assert!(svg.body().contains(r#"<rect x="1.00" y="2.50" width="3.33" height="4.00" fill="red"/>"#));
}
