use crate::model::cell::{capacity_for, Cell};
use crate::model::spore::{scatter_with_rng, SporeRelease};
use crate::model::world::World;
use crate::model::DnaLogic;
use mycelia_core::systems::biology::{self, BiologyContext};
use mycelia_core::systems::growth;
use mycelia_core::systems::sharing::{self, ShareSnapshot};
use mycelia_core::systems::spores::{self, SporeFate};
use mycelia_data::{EnergyKind, FlowLabel, GridPos, LiveEvent, OrganismId, TraitBudget};
use rand::seq::SliceRandom;
use std::time::Instant;
use tracing::{debug, trace};

impl World {
    /// Advances the simulation by one tick.
    ///
    /// Phases run in a fixed order:
    /// - Tick bookkeeping reset and soil regeneration
    /// - Per-cell biology (metabolism, acquisition, conversion, mushrooms and spore release)
    /// - Growth in shuffled order
    /// - Energy sharing between neighbouring cells of one fungus
    /// - Spore germination
    /// - Dead-cell sweep and organism splitting
    ///
    /// # Arguments
    /// * `dt` - Simulated seconds covered by this tick (0 pauses growth)
    /// * `sun_rate` - Sun units per second reaching each tile
    ///
    /// # Returns
    /// Notable events of the tick (spawns, expansions, deaths, splits)
    pub fn update(&mut self, dt: f64, sun_rate: f64) -> anyhow::Result<Vec<LiveEvent>> {
        anyhow::ensure!(
            dt.is_finite() && dt >= 0.0,
            "Tick duration must be finite and non-negative, got {dt}"
        );
        let started = Instant::now();
        self.config.validate()?;
        let budget = self.config.traits.budget()?;
        let sun_rate = if sun_rate.is_finite() {
            sun_rate.max(0.0)
        } else {
            0.0
        };

        self.tick += 1;
        self.elapsed += dt;
        let mut events = std::mem::take(&mut self.pending_events);

        self.pass_reset(dt);
        self.pass_biology(dt, sun_rate, &budget, &mut events);
        self.pass_growth(&mut events);
        self.pass_sharing(dt);
        self.pass_spores(dt, &mut events);
        self.finalize_tick(&mut events);

        self.metrics.record_tick(
            started.elapsed(),
            self.cell_index.len(),
            self.organisms.len(),
            self.spores.len(),
        );
        trace!(
            tick = self.tick,
            cells = self.cell_index.len(),
            organisms = self.organisms.len(),
            events = events.len(),
            "Tick complete"
        );

        Ok(events)
    }

    /// Living cells in a stable order: by organism id, then by position.
    fn cell_roster(&self) -> Vec<(OrganismId, GridPos, hecs::Entity)> {
        self.organisms
            .values()
            .flat_map(|f| f.cells().map(move |(pos, handle)| (f.id(), pos, handle)))
            .filter(|(_, _, handle)| {
                self.ecs
                    .get::<&Cell>(*handle)
                    .is_ok_and(|cell| cell.is_alive())
            })
            .collect()
    }

    fn pass_reset(&mut self, dt: f64) {
        for (_handle, cell) in self.ecs.query_mut::<&mut Cell>() {
            cell.reset_tick();
        }
        self.tiles.regenerate_all(&self.config.tiles, dt);
    }

    fn pass_biology(
        &mut self,
        dt: f64,
        sun_rate: f64,
        budget: &TraitBudget,
        events: &mut Vec<LiveEvent>,
    ) {
        for (org_id, pos, handle) in self.cell_roster() {
            let Some(fungus) = self.organisms.get(&org_id) else {
                continue;
            };
            let traits = *fungus.traits();
            let ctx = BiologyContext {
                config: &self.config,
                traits: &traits,
                cell_count: fungus.cell_count().max(1),
                sun_rate,
                dt,
            };

            {
                let Ok(cell) = self.ecs.query_one_mut::<&mut Cell>(handle) else {
                    continue;
                };
                // Parasites earlier in the roster may already have killed this cell.
                if !cell.is_alive() {
                    continue;
                }
                biology::metabolize(cell, &ctx);
                if !cell.is_alive() {
                    continue;
                }
                biology::photosynthesize(cell, &ctx);
                if let Some(tile) = self.tiles.get_mut(pos) {
                    biology::absorb_soil(cell, tile, &ctx);
                }
            }

            let victims: Vec<hecs::Entity> = pos
                .moore_neighbors()
                .into_iter()
                .filter_map(|n| self.cell_index.get(&n).copied())
                .filter(|victim| {
                    self.ecs
                        .get::<&Cell>(*victim)
                        .is_ok_and(|c| c.is_alive() && c.organism() != org_id)
                })
                .collect();
            let drain_rate = biology::parasitism_rate(&traits, &self.config);
            for victim in &victims {
                let claim = match self.ecs.query_one_mut::<&mut Cell>(handle) {
                    Ok(parasite) => biology::parasitism_claim(parasite, &ctx),
                    Err(_) => 0,
                };
                if claim == 0 {
                    continue;
                }
                let taken = match self.ecs.query_one_mut::<&mut Cell>(*victim) {
                    Ok(prey) => biology::drain_victim(prey, claim),
                    Err(_) => 0,
                };
                if let Ok(parasite) = self.ecs.query_one_mut::<&mut Cell>(handle) {
                    biology::feed_parasite(parasite, taken);
                }
            }

            let matured = match self.ecs.query_one_mut::<&mut Cell>(handle) {
                Ok(cell) => {
                    cell.rates.parasitism = drain_rate * victims.len() as f64;
                    biology::convert(cell);
                    let matured = biology::grow_mushroom(cell, &self.config, dt);
                    if matured {
                        cell.remove_mushroom();
                    }
                    matured
                }
                Err(_) => false,
            };
            if matured {
                self.release_spores(org_id, pos, budget, events);
            }
        }
    }

    /// Scatters the spores of a mature mushroom.
    ///
    /// The parent's traits are mutated once and every spore of the release
    /// carries that same copy.
    fn release_spores(
        &mut self,
        org_id: OrganismId,
        origin: GridPos,
        budget: &TraitBudget,
        events: &mut Vec<LiveEvent>,
    ) {
        let Some(fungus) = self.organisms.get(&org_id) else {
            return;
        };
        let traits =
            fungus
                .traits()
                .mutate_with_rng(self.config.spores.mutation_strength, budget, &mut self.rng);
        let release = SporeRelease {
            origin,
            count: self.config.spores.count,
            radius: self.config.spores.scatter_radius,
            lifetime: self.config.spores.lifetime,
            traits,
            parent_id: org_id,
            parent_generation: fungus.generation(),
        };
        let landed = scatter_with_rng(&release, &self.tiles, &mut self.rng);
        debug!(
            organism = %org_id,
            %origin,
            released = release.count,
            landed = landed.len(),
            "Mushroom released spores"
        );
        events.push(LiveEvent::SporesReleased {
            id: org_id,
            pos: origin,
            count: landed.len(),
            tick: self.tick,
        });
        self.spores.extend(landed);
    }

    fn pass_growth(&mut self, events: &mut Vec<LiveEvent>) {
        let mut roster = self.cell_roster();
        roster.shuffle(&mut self.rng);
        let growth_config = self.config.growth.clone();

        for (org_id, pos, handle) in roster {
            let Some(traits) = self.organisms.get(&org_id).map(|f| *f.traits()) else {
                continue;
            };

            let cost = growth::expansion_cost(&traits, &growth_config);
            let affordable = self
                .ecs
                .get::<&Cell>(handle)
                .is_ok_and(|c| c.is_alive() && growth::can_afford(&c, cost, &growth_config));
            if affordable {
                if let Some(target) = growth::pick_expansion_target(pos, &self.tiles, &mut self.rng)
                {
                    let offspring = match self.ecs.query_one_mut::<&mut Cell>(handle) {
                        Ok(cell) => growth::pay_for_expansion(cell, cost, &growth_config),
                        Err(_) => None,
                    };
                    if let Some(nutrition) = offspring {
                        let capacity = capacity_for(&traits, &self.config.cell);
                        self.place_cell(Cell::new(target, org_id, capacity, nutrition));
                        events.push(LiveEvent::Expanded {
                            id: org_id,
                            from: pos,
                            to: target,
                            tick: self.tick,
                        });
                    }
                }
            }

            let armed = match self.ecs.query_one_mut::<&mut Cell>(handle) {
                Ok(cell) => growth::try_arm_mushroom(cell, &traits, &growth_config),
                Err(_) => false,
            };
            if armed {
                events.push(LiveEvent::MushroomArmed {
                    id: org_id,
                    pos,
                    tick: self.tick,
                });
            }
        }
    }

    fn pass_sharing(&mut self, dt: f64) {
        let sharing_config = self.config.sharing.clone();

        for (org_id, pos, handle) in self.cell_roster() {
            let kin: Vec<hecs::Entity> = pos
                .moore_neighbors()
                .into_iter()
                .filter_map(|n| self.cell_index.get(&n).copied())
                .filter(|h| {
                    self.ecs
                        .get::<&Cell>(*h)
                        .is_ok_and(|c| c.is_alive() && c.organism() == org_id)
                })
                .collect();
            if kin.is_empty() {
                continue;
            }

            let Some(me) = self.snapshot(handle) else {
                continue;
            };
            let neighbours: Vec<ShareSnapshot> =
                kin.iter().filter_map(|h| self.snapshot(*h)).collect();
            if neighbours.len() != kin.len() {
                continue;
            }

            let push = sharing::push_plan(&me, &neighbours, &sharing_config);
            for (recipient, amount) in kin.iter().zip(push) {
                self.move_nutrition(handle, *recipient, amount);
            }

            let budget = match self.ecs.query_one_mut::<&mut Cell>(handle) {
                Ok(cell) => sharing::pull_budget(cell, &sharing_config, dt),
                Err(_) => 0,
            };
            if budget == 0 {
                continue;
            }
            let donors: Vec<ShareSnapshot> =
                kin.iter().filter_map(|h| self.snapshot(*h)).collect();
            if donors.len() != kin.len() {
                continue;
            }
            let pull = sharing::pull_plan(budget, &donors, &sharing_config);
            for (donor, amount) in kin.iter().zip(pull) {
                self.move_nutrition(*donor, handle, amount);
            }
        }
    }

    fn snapshot(&self, handle: hecs::Entity) -> Option<ShareSnapshot> {
        self.ecs
            .get::<&Cell>(handle)
            .ok()
            .map(|c| ShareSnapshot::of(&c))
    }

    /// Moves nutrition between two living cells as one debit and one credit.
    ///
    /// The amount is trimmed to the recipient's room first, so nothing is lost.
    fn move_nutrition(&mut self, from: hecs::Entity, to: hecs::Entity, amount: u64) -> u64 {
        if amount == 0 {
            return 0;
        }
        let room = match self.ecs.get::<&Cell>(to) {
            Ok(c) if c.is_alive() => c.deficit(),
            _ => return 0,
        };
        let taken = match self.ecs.query_one_mut::<&mut Cell>(from) {
            Ok(c) if c.is_alive() => {
                c.consume(EnergyKind::Nutrition, amount.min(room), FlowLabel::Sharing)
            }
            _ => return 0,
        };
        match self.ecs.query_one_mut::<&mut Cell>(to) {
            Ok(c) => c.gain(EnergyKind::Nutrition, taken, FlowLabel::Sharing),
            Err(_) => 0,
        }
    }

    fn pass_spores(&mut self, dt: f64, events: &mut Vec<LiveEvent>) {
        let germination_energy = self.config.spores.germination_energy;
        for mut spore in std::mem::take(&mut self.spores) {
            match spores::advance(&mut spore, &self.tiles, dt) {
                SporeFate::Germinate => {
                    let generation = spore.parent_generation + 1;
                    if let Some(id) = self.found_organism(
                        spore.pos,
                        spore.traits,
                        generation,
                        Some(spore.parent_id),
                        germination_energy,
                    ) {
                        debug!(
                            organism = %id,
                            parent = %spore.parent_id,
                            pos = %spore.pos,
                            generation,
                            "Spore germinated"
                        );
                        events.push(LiveEvent::Germinated {
                            id,
                            parent_id: spore.parent_id,
                            pos: spore.pos,
                            generation,
                            tick: self.tick,
                        });
                    }
                }
                SporeFate::Discard(reason) => {
                    trace!(pos = %spore.pos, ?reason, "Spore discarded");
                }
            }
        }
    }
}
