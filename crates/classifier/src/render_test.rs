use crate::metrics::ConfusionMatrix;
use crate::render::{blues, confusion_matrix_svg};

fn confusion() -> ConfusionMatrix {
    let mut y_true = vec![0; 52];
    y_true.extend(vec![1; 48]);
    let mut y_pred = vec![0; 50];
    y_pred.extend(vec![1; 2]);
    y_pred.extend(vec![0; 3]);
    y_pred.extend(vec![1; 45]);
    ConfusionMatrix::from_labels(&y_true, &y_pred, 2).unwrap()
}

#[test]
fn blues_spans_light_to_dark() {
    assert_eq!(blues(0.0), (0xf7, 0xfb, 0xff));
    assert_eq!(blues(1.0), (0x08, 0x30, 0x6b));
    assert_eq!(blues(-3.0), blues(0.0));
    assert_eq!(blues(7.0), blues(1.0));
    assert_eq!(blues(f64::NAN), blues(0.0));

    let (light, _, _) = blues(0.25);
    let (dark, _, _) = blues(0.75);
    assert!(light > dark);
}

#[test]
fn svg_has_counts_axes_and_title() {
    let svg = confusion_matrix_svg(&confusion(), "Confusion Matrix on N2 Dataset");

    assert!(svg.starts_with("<svg"));
    assert!(svg.ends_with("</svg>\n"));
    assert!(svg.contains("Confusion Matrix on N2 Dataset"));
    assert!(svg.contains("Predicted label"));
    assert!(svg.contains("True label"));
    for count in [50, 2, 3, 45] {
        assert!(svg.contains(&format!(">{count}</text>")));
    }
}

#[test]
fn annotations_contrast_with_cells() {
    let svg = confusion_matrix_svg(&confusion(), "cm");

    assert!(svg.contains(r#"fill="white">50</text>"#));
    assert!(svg.contains(r#"fill="black">2</text>"#));
}

#[test]
fn title_is_escaped() {
    let svg = confusion_matrix_svg(&confusion(), "H2 & N2 <test>");

    assert!(svg.contains("H2 &amp; N2 &lt;test&gt;"));
}
