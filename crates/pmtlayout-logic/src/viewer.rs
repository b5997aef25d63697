//! Self-contained three.js page for inspecting a layout in a browser.
//!
//! The page draws the box as a translucent shell and each sensor as a
//! short cylinder aligned with its facing direction.

use serde::Serialize;

use crate::config::BoxDimensions;
use crate::pmtinfo::PmtInfo;

/// Rendered cylinder length as a fraction of the sensor diameter.
const RENDER_LENGTH_RATIO: f64 = 0.8;

const TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>3D Detector Visualization</title>
<style>
body { margin: 0; font-family: Arial, sans-serif; background-color: #f0f0f0; color: #333; overflow: hidden; }
#container { width: 100vw; height: 100vh; display: block; }
#infoBox { position: absolute; top: 10px; left: 10px; padding: 10px; background-color: rgba(255, 255, 255, 0.9);
  border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.2); font-size: 12px; max-width: 300px; }
canvas { display: block; }
</style>
</head>
<body>
<div id="infoBox">
<p><strong>3D Detector Visualization</strong></p>
<p>Detector (Lx,Ly,Lz): @@DIMS_LABEL@@ mm</p>
<p>PMTs: @@COUNT@@ placed (@@DIAMETER@@ mm diameter)</p>
<p>Controls: Orbit (LMB), Zoom (Scroll), Pan (RMB)</p>
</div>
<div id="container"></div>
<script src="https://cdnjs.cloudflare.com/ajax/libs/three.js/r128/three.min.js"></script>
<script src="https://cdn.jsdelivr.net/npm/three@0.128.0/examples/js/controls/OrbitControls.js"></script>
<script>
const DETECTOR_SIZE = @@DIMS@@;
const PMT_RADIUS_MM = @@RADIUS@@;
const PMT_RENDER_LENGTH_MM = @@RENDER_LENGTH@@;
const pmtData = @@PMT_DATA@@;
let scene, camera, renderer, controls;
function init() {
  scene = new THREE.Scene();
  scene.background = new THREE.Color(0xcccccc);
  const maxDim = Math.max(...DETECTOR_SIZE);
  camera = new THREE.PerspectiveCamera(50, window.innerWidth / window.innerHeight, 10, 200000);
  camera.position.set(maxDim * 0.8, maxDim * 0.6, maxDim * 1.3);
  camera.lookAt(0, 0, 0);
  renderer = new THREE.WebGLRenderer({ antialias: true });
  renderer.setSize(window.innerWidth, window.innerHeight);
  document.getElementById('container').appendChild(renderer.domElement);
  controls = new THREE.OrbitControls(camera, renderer.domElement);
  controls.enableDamping = true;
  controls.dampingFactor = 0.05;
  scene.add(new THREE.AmbientLight(0xffffff, 0.7));
  const key = new THREE.DirectionalLight(0xffffff, 0.6);
  key.position.set(1, 1.5, 1).normalize();
  scene.add(key);
  const fill = new THREE.DirectionalLight(0xffffff, 0.3);
  fill.position.set(-1, -0.5, -1).normalize();
  scene.add(fill);
  scene.add(new THREE.AxesHelper(maxDim / 3));
  createDetectorBox();
  createPMTs();
  window.addEventListener('resize', onWindowResize, false);
  animate();
}
function createDetectorBox() {
  const geom = new THREE.BoxGeometry(DETECTOR_SIZE[0], DETECTOR_SIZE[1], DETECTOR_SIZE[2]);
  const mat = new THREE.MeshStandardMaterial({ color: 0x5577aa, transparent: true, opacity: 0.2, side: THREE.DoubleSide });
  const mesh = new THREE.Mesh(geom, mat);
  mesh.add(new THREE.LineSegments(new THREE.EdgesGeometry(geom), new THREE.LineBasicMaterial({ color: 0x223355 })));
  scene.add(mesh);
}
function createPMTs() {
  const geom = new THREE.CylinderGeometry(PMT_RADIUS_MM, PMT_RADIUS_MM, PMT_RENDER_LENGTH_MM, 24);
  const mat = new THREE.MeshStandardMaterial({ color: 0xff8c00, emissive: 0x221100 });
  const up = new THREE.Vector3(0, 1, 0);
  pmtData.forEach(p => {
    const mesh = new THREE.Mesh(geom, mat);
    mesh.position.set(p.x, p.y, p.z);
    const dir = new THREE.Vector3(p.dir_x, p.dir_y, p.dir_z).normalize();
    mesh.quaternion.multiply(new THREE.Quaternion().setFromUnitVectors(up, dir));
    scene.add(mesh);
  });
}
function onWindowResize() {
  camera.aspect = window.innerWidth / window.innerHeight;
  camera.updateProjectionMatrix();
  renderer.setSize(window.innerWidth, window.innerHeight);
}
function animate() {
  requestAnimationFrame(animate);
  controls.update();
  renderer.render(scene, camera);
}
init();
</script>
</body>
</html>
"#;

#[derive(Serialize)]
struct SensorPoint {
    x: f64,
    y: f64,
    z: f64,
    dir_x: f64,
    dir_y: f64,
    dir_z: f64,
}

/// Render the viewer page for `table` inside a box of `dims`.
pub fn render_html(
    dims: &BoxDimensions,
    table: &PmtInfo,
    physical_diameter: f64,
) -> serde_json::Result<String> {
    let points: Vec<SensorPoint> = table
        .sensors()
        .map(|s| SensorPoint {
            x: s.position[0],
            y: s.position[1],
            z: s.position[2],
            dir_x: s.direction[0],
            dir_y: s.direction[1],
            dir_z: s.direction[2],
        })
        .collect();

    let [lx, ly, lz] = dims.as_array();
    Ok(TEMPLATE
        .replace("@@DIMS_LABEL@@", &format!("{lx:.0}, {ly:.0}, {lz:.0}"))
        .replace("@@COUNT@@", &table.len().to_string())
        .replace("@@DIAMETER@@", &format!("{physical_diameter:.1}"))
        .replace("@@DIMS@@", &serde_json::to_string(&dims.as_array())?)
        .replace("@@RADIUS@@", &serde_json::to_string(&(physical_diameter / 2.0))?)
        .replace(
            "@@RENDER_LENGTH@@",
            &serde_json::to_string(&(physical_diameter * RENDER_LENGTH_RATIO))?,
        )
        .replace("@@PMT_DATA@@", &serde_json::to_string(&points)?))
}
