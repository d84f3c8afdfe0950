use crate::domain::repository::CatalogRepository;
use crate::domain::types::{Food, FoodCategory, NewFood, validate_category_name};
use crate::error::OrderingServiceError;

pub struct CatalogService<C: CatalogRepository> {
    pub catalog: C,
}

impl<C: CatalogRepository> CatalogService<C> {
    pub async fn create_category(
        &self,
        name: Option<&str>,
    ) -> Result<FoodCategory, OrderingServiceError> {
        validate_category_name(name).map_err(OrderingServiceError::Validation)?;
        let category = self.catalog.create_category(name).await?;
        tracing::info!(category_id = category.id, "food category created");
        Ok(category)
    }

    pub async fn add_food(&self, input: NewFood) -> Result<Food, OrderingServiceError> {
        input.validate().map_err(OrderingServiceError::Validation)?;
        if self.catalog.find_category(input.food_category_id).await?.is_none() {
            return Err(OrderingServiceError::InvalidReference(format!(
                "food category {} does not exist",
                input.food_category_id
            )));
        }
        let food = self.catalog.create_food(&input).await?;
        tracing::info!(food_id = food.id, category_id = food.food_category_id, "food added");
        Ok(food)
    }

    /// `false` if the category does not exist. Fails with
    /// [`OrderingServiceError::ConstraintViolation`] while foods reference it.
    pub async fn delete_category(&self, category_id: i32) -> Result<bool, OrderingServiceError> {
        let deleted = self.catalog.delete_category(category_id).await?;
        if deleted {
            tracing::info!(category_id, "food category deleted");
        }
        Ok(deleted)
    }

    pub async fn delete_food(&self, food_id: i32) -> Result<bool, OrderingServiceError> {
        let deleted = self.catalog.delete_food(food_id).await?;
        if deleted {
            tracing::info!(food_id, "food deleted");
        }
        Ok(deleted)
    }
}
