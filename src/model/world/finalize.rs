use crate::model::cell::Cell;
use crate::model::organism::Fungus;
use crate::model::world::World;
use mycelia_core::systems::connectivity::split_plan;
use mycelia_data::{GridPos, LiveEvent, OrganismId};
use std::collections::BTreeSet;
use tracing::{debug, error};

impl World {
    /// Removes the dead, then breaks up fungi that lost their connectivity.
    ///
    /// Splitting runs after the sweep so fragmentation caused by deaths this
    /// tick is detected immediately.
    pub(super) fn finalize_tick(&mut self, events: &mut Vec<LiveEvent>) {
        self.pass_dead_sweep(events);
        self.pass_split(events);
    }

    fn pass_dead_sweep(&mut self, events: &mut Vec<LiveEvent>) {
        let mut dead: Vec<(GridPos, OrganismId)> = self
            .ecs
            .query::<&Cell>()
            .iter()
            .filter(|(_, cell)| !cell.is_alive())
            .map(|(_, cell)| (cell.pos(), cell.organism()))
            .collect();
        dead.sort();

        for (pos, owner) in dead {
            let known = self.organisms.contains_key(&owner);
            debug_assert!(known, "dead cell at {pos} has no organism {owner}");
            if !known {
                error!(organism = %owner, %pos, "Dead cell references a missing organism");
            }
            if self.retire_cell(pos).is_some() {
                events.push(LiveEvent::CellDied {
                    id: owner,
                    pos,
                    tick: self.tick,
                });
            }
        }

        let extinct: Vec<OrganismId> = self
            .organisms
            .values()
            .filter(|f| !f.is_alive())
            .map(Fungus::id)
            .collect();
        for id in extinct {
            if let Some(fungus) = self.organisms.remove(&id) {
                debug!(organism = %id, name = fungus.name(), "Organism went extinct");
                events.push(LiveEvent::Extinct {
                    id,
                    generation: fungus.generation(),
                    tick: self.tick,
                });
            }
        }
    }

    /// Rehomes every disconnected fragment onto a new fungus.
    ///
    /// The largest component keeps the original identity. Fragment cells are
    /// recreated under the new owner and the old instances retired.
    fn pass_split(&mut self, events: &mut Vec<LiveEvent>) {
        let candidates: Vec<OrganismId> = self
            .organisms
            .values()
            .filter(|f| f.cell_count() > 1)
            .map(Fungus::id)
            .collect();

        for id in candidates {
            let Some(fungus) = self.organisms.get(&id) else {
                continue;
            };
            let cells: BTreeSet<GridPos> = fungus.positions().collect();
            let Some(plan) = split_plan(&cells) else {
                continue;
            };
            let traits = *fungus.traits();
            let generation = fungus.generation();

            let mut offshoot_ids = Vec::with_capacity(plan.offshoots.len());
            for fragment in plan.offshoots {
                let new_id = self.ids.next_id();
                self.organisms
                    .insert(new_id, Fungus::new(new_id, traits, generation, Some(id)));
                for pos in fragment {
                    if let Some(old) = self.retire_cell(pos) {
                        self.place_cell(old.rehomed(new_id));
                    }
                }
                offshoot_ids.push(new_id);
            }

            debug!(
                organism = %id,
                kept = plan.keep.len(),
                offshoots = offshoot_ids.len(),
                "Organism split"
            );
            events.push(LiveEvent::OrganismSplit {
                id,
                offshoots: offshoot_ids,
                tick: self.tick,
            });
        }
    }
}
