use std::collections::{HashMap, HashSet};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

/// Bounds of the rating scale the model trains and predicts on.
const RATING_MIN: f64 = 0.0;
const RATING_MAX: f64 = 10.0;

/// Predictions below this never reach the caller.
const SCORE_THRESHOLD: f64 = 6.0;

/// Maximum number of recommendations returned.
const TOP_N: usize = 5;

/// One observed (user, item, rating) triple on the 0-10 scale.
#[derive(Debug, Clone)]
pub struct Rating {
    pub user: i64,
    pub item: String,
    pub value: f64,
}

/// A scored unseen item for a user.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredItem {
    pub item: String,
    pub score: f64,
}

#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("user {0} not found in the dataset")]
    UserNotFound(i64),
    #[error("no ratings available to train on")]
    EmptyTrainset,
}

/// Produces ranked recommendations for a user from the full ratings table.
///
/// Implementations retrain from scratch on every call; there is no model
/// persistence or incremental update.
pub trait Recommender: Send + Sync {
    fn recommend(&self, ratings: &[Rating], user: i64) -> Result<Vec<ScoredItem>, RecommendError>;
}

/// Biased matrix factorization trained with stochastic gradient descent.
///
/// Each user and item gets a bias term and a latent factor vector; a
/// prediction is the global mean plus both biases plus the factor dot
/// product, clamped to the rating scale. Unseen items for the target user
/// are scored, sorted descending, filtered to the score threshold, and cut
/// to the top five.
pub struct SvdRecommender {
    factors: usize,
    epochs: usize,
    learning_rate: f64,
    regularization: f64,
    seed: u64,
}

impl Default for SvdRecommender {
    fn default() -> Self {
        Self::new(20, 20, 0.007, 0.02, 2024)
    }
}

impl SvdRecommender {
    pub fn new(
        factors: usize,
        epochs: usize,
        learning_rate: f64,
        regularization: f64,
        seed: u64,
    ) -> Self {
        Self {
            factors,
            epochs,
            learning_rate,
            regularization,
            seed,
        }
    }

    fn fit(&self, trainset: &Trainset) -> Model {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let n_users = trainset.user_index.len();
        let n_items = trainset.items.len();

        let mut user_bias = vec![0.0; n_users];
        let mut item_bias = vec![0.0; n_items];
        let mut user_factors: Vec<Vec<f64>> = (0..n_users)
            .map(|_| init_factors(self.factors, &mut rng))
            .collect();
        let mut item_factors: Vec<Vec<f64>> = (0..n_items)
            .map(|_| init_factors(self.factors, &mut rng))
            .collect();

        let lr = self.learning_rate;
        let reg = self.regularization;

        for _ in 0..self.epochs {
            for &(u, i, value) in &trainset.triples {
                let dot: f64 = user_factors[u]
                    .iter()
                    .zip(&item_factors[i])
                    .map(|(p, q)| p * q)
                    .sum();
                let err = value - (trainset.global_mean + user_bias[u] + item_bias[i] + dot);

                user_bias[u] += lr * (err - reg * user_bias[u]);
                item_bias[i] += lr * (err - reg * item_bias[i]);
                for f in 0..self.factors {
                    let p = user_factors[u][f];
                    let q = item_factors[i][f];
                    user_factors[u][f] += lr * (err * q - reg * p);
                    item_factors[i][f] += lr * (err * p - reg * q);
                }
            }
        }

        Model {
            global_mean: trainset.global_mean,
            user_bias,
            item_bias,
            user_factors,
            item_factors,
        }
    }
}

impl Recommender for SvdRecommender {
    fn recommend(&self, ratings: &[Rating], user: i64) -> Result<Vec<ScoredItem>, RecommendError> {
        let trainset = Trainset::build(ratings)?;
        let user_idx = trainset
            .user_index
            .get(&user)
            .copied()
            .ok_or(RecommendError::UserNotFound(user))?;

        let model = self.fit(&trainset);

        let rated = &trainset.rated_by_user[user_idx];
        let mut scored: Vec<ScoredItem> = (0..trainset.items.len())
            .filter(|i| !rated.contains(i))
            .map(|i| ScoredItem {
                item: trainset.items[i].clone(),
                score: model.predict(user_idx, i),
            })
            .collect();

        scored.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.retain(|s| s.score >= SCORE_THRESHOLD);
        scored.truncate(TOP_N);
        Ok(scored)
    }
}

fn init_factors(n: usize, rng: &mut StdRng) -> Vec<f64> {
    (0..n).map(|_| (rng.gen::<f64>() - 0.5) * 0.1).collect()
}

/// Dense-index view of the ratings table.
struct Trainset {
    items: Vec<String>,
    user_index: HashMap<i64, usize>,
    triples: Vec<(usize, usize, f64)>,
    rated_by_user: Vec<HashSet<usize>>,
    global_mean: f64,
}

impl Trainset {
    fn build(ratings: &[Rating]) -> Result<Self, RecommendError> {
        if ratings.is_empty() {
            return Err(RecommendError::EmptyTrainset);
        }

        let mut items = Vec::new();
        let mut user_index = HashMap::new();
        let mut item_index: HashMap<String, usize> = HashMap::new();
        let mut triples = Vec::with_capacity(ratings.len());

        for rating in ratings {
            let next_user = user_index.len();
            let u = *user_index.entry(rating.user).or_insert(next_user);
            let i = *item_index.entry(rating.item.clone()).or_insert_with(|| {
                items.push(rating.item.clone());
                items.len() - 1
            });
            triples.push((u, i, rating.value.clamp(RATING_MIN, RATING_MAX)));
        }

        let mut rated_by_user = vec![HashSet::new(); user_index.len()];
        for &(u, i, _) in &triples {
            rated_by_user[u].insert(i);
        }

        let global_mean =
            triples.iter().map(|&(_, _, v)| v).sum::<f64>() / triples.len() as f64;

        Ok(Self {
            items,
            user_index,
            triples,
            rated_by_user,
            global_mean,
        })
    }
}

struct Model {
    global_mean: f64,
    user_bias: Vec<f64>,
    item_bias: Vec<f64>,
    user_factors: Vec<Vec<f64>>,
    item_factors: Vec<Vec<f64>>,
}

impl Model {
    fn predict(&self, user: usize, item: usize) -> f64 {
        let dot: f64 = self.user_factors[user]
            .iter()
            .zip(&self.item_factors[item])
            .map(|(p, q)| p * q)
            .sum();
        (self.global_mean + self.user_bias[user] + self.item_bias[item] + dot)
            .clamp(RATING_MIN, RATING_MAX)
    }
}
