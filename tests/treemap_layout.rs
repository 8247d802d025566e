use tradeflow_rs::hierarchy::to_hierarchy;
use tradeflow_rs::models::TreemapPayload;
use tradeflow_rs::viz::treemap::{Rect, hit_test, layout_tree, squarify};

fn overlap_area(a: &Rect, b: &Rect) -> f64 {
    let w = (a.x1.min(b.x1) - a.x0.max(b.x0)).max(0.0);
    let h = (a.y1.min(b.y1) - a.y0.max(b.y0)).max(0.0);
    w * h
}

#[test]
fn areas_proportional_to_weights() {
    let region = Rect::new(0.0, 0.0, 400.0, 300.0);
    let weights = [500.0, 300.0, 150.0, 50.0];
    let rects = squarify(&weights, region);
    let total: f64 = weights.iter().sum();
    for (w, r) in weights.iter().zip(&rects) {
        let expected = region.area() * w / total;
        assert!(
            (r.area() - expected).abs() < 1e-6,
            "weight {w} got area {} expected {expected}",
            r.area()
        );
    }
}

#[test]
fn rects_contained_and_disjoint() {
    let region = Rect::new(10.0, 20.0, 410.0, 320.0);
    let weights = [8.0, 5.0, 5.0, 3.0, 2.0, 1.0];
    let rects = squarify(&weights, region);
    for r in &rects {
        assert!(r.x0 >= region.x0 - 1e-6 && r.x1 <= region.x1 + 1e-6);
        assert!(r.y0 >= region.y0 - 1e-6 && r.y1 <= region.y1 + 1e-6);
    }
    for i in 0..rects.len() {
        for j in i + 1..rects.len() {
            assert!(
                overlap_area(&rects[i], &rects[j]) < 1e-6,
                "rects {i} and {j} overlap"
            );
        }
    }
}

#[test]
fn degenerate_inputs_yield_empty_rects() {
    let region = Rect::new(0.0, 0.0, 100.0, 100.0);
    for weights in [vec![], vec![0.0, 0.0], vec![-5.0, -1.0]] {
        let rects = squarify(&weights, region);
        assert_eq!(rects.len(), weights.len());
        assert!(rects.iter().all(|r| r.area() == 0.0));
    }
    // Zero-area region.
    let rects = squarify(&[1.0, 2.0], Rect::new(5.0, 5.0, 5.0, 5.0));
    assert!(rects.iter().all(|r| r.area() == 0.0));
}

fn nested_tree() -> tradeflow_rs::hierarchy::GoodsTree {
    let payload: TreemapPayload = serde_json::from_str(
        r#"
        {
          "treemap": {
            "name": "Trade in goods",
            "children": [
              {
                "name": "Exports",
                "children": [
                  {
                    "name": "Machinery",
                    "children": [
                      { "name": "Turbines", "titlePrefix": "84", "value": 400 },
                      { "name": "Pumps", "titlePrefix": "84", "value": 200 }
                    ]
                  },
                  { "name": "Watches", "titlePrefix": "91", "value": 400 }
                ]
              },
              {
                "name": "Imports",
                "children": [
                  { "name": "Fuels", "titlePrefix": "27", "value": 500 }
                ]
              }
            ]
          }
        }
        "#,
    )
    .unwrap();
    to_hierarchy(&payload).unwrap()
}

#[test]
fn layout_emits_only_depth_two_and_below() {
    let tree = nested_tree();
    let cells = layout_tree(&tree.root, Rect::new(0.0, 55.0, 600.0, 400.0));
    assert!(cells.iter().all(|c| c.depth >= 2));
    // Depth-1 names never appear as cells.
    assert!(cells.iter().all(|c| c.name != "Exports" && c.name != "Imports"));
    // Machinery (internal, depth 2) and its leaves (depth 3) all present.
    assert!(cells.iter().any(|c| c.name == "Machinery" && !c.leaf));
    assert!(cells.iter().any(|c| c.name == "Turbines" && c.leaf));
    let names: Vec<&str> = cells.iter().map(|c| c.name.as_str()).collect();
    let machinery_at = names.iter().position(|n| *n == "Machinery").unwrap();
    let turbines_at = names.iter().position(|n| *n == "Turbines").unwrap();
    assert!(machinery_at < turbines_at, "parents come before children");
}

#[test]
fn cells_stay_inside_the_region_and_carry_their_category() {
    let tree = nested_tree();
    let region = Rect::new(0.0, 55.0, 600.0, 400.0);
    let cells = layout_tree(&tree.root, region);
    for c in &cells {
        assert!(c.rect.x0 >= region.x0 - 1e-6 && c.rect.x1 <= region.x1 + 1e-6);
        assert!(c.rect.y0 >= region.y0 - 1e-6 && c.rect.y1 <= region.y1 + 1e-6);
        let expected = if c.name == "Fuels" { "Imports" } else { "Exports" };
        assert_eq!(c.category, expected, "cell {}", c.name);
    }
}

#[test]
fn hit_test_returns_the_topmost_cell() {
    let tree = nested_tree();
    let cells = layout_tree(&tree.root, Rect::new(0.0, 0.0, 600.0, 400.0));
    let turbines = cells.iter().find(|c| c.name == "Turbines").unwrap();
    let center = (
        (turbines.rect.x0 + turbines.rect.x1) / 2.0,
        (turbines.rect.y0 + turbines.rect.y1) / 2.0,
    );
    // The pointer is inside both "Machinery" and "Turbines"; the deeper
    // cell is the one drawn on top.
    let hit = hit_test(&cells, center.0, center.1).unwrap();
    assert_eq!(hit.name, "Turbines");

    assert!(hit_test(&cells, -10.0, -10.0).is_none());
}
