// orbit/mod.rs
//
// Procedural swim paths: each creature circles a randomly placed center with a
// wobbling radius while the center itself drifts slowly.
//
//   let orbit = generator.generate(viewport, &mut rng);
//   store.set(id, orbit);
//   let pos = compute_position(&orbit, elapsed, viewport, &config);

pub mod descriptor;
pub mod generator;
pub mod position;
pub mod store;

pub use descriptor::OrbitDescriptor;
pub use generator::OrbitGenerator;
pub use position::compute_position;
pub use store::OrbitStore;
