use application::service::{
    CancelOrderService, GetOrderService, PlaceOrderService, ShipOrderService,
};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use error_stack::Report;
use kernel::KernelError;
use uuid::Uuid;

use crate::controller::Controller;
use crate::error::ErrorStatus;
use crate::handler::{AppModule, Database};
use crate::request::{
    CancelOrderRequest, CreateOrderRequest, GetOrderRequest, OrderTransformer, ShipOrderRequest,
};
use crate::response::OrderPresenter;

pub trait OrderRouter {
    fn route_order(self) -> Self;
}

impl<D: Database> OrderRouter for Router<AppModule<D>> {
    fn route_order(self) -> Self {
        self.route(
            "/orders",
            get(|State(module): State<AppModule<D>>| async move {
                Controller::new((), OrderPresenter)
                    .bypass(|| module.database().get_all_orders())
                    .await
                    .map_err(ErrorStatus::from)
            })
            .post(
                |State(module): State<AppModule<D>>, Json(req): Json<CreateOrderRequest>| async move {
                    Controller::new(OrderTransformer, OrderPresenter)
                        .try_intake(req)?
                        .handle(|dto| async move { module.database().place_order(dto).await })
                        .await
                        .map(|res| (StatusCode::CREATED, res))
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/orders/:id",
            get(
                |State(module): State<AppModule<D>>, Path(id): Path<Uuid>| async move {
                    Controller::new(OrderTransformer, OrderPresenter)
                        .intake(GetOrderRequest::new(id))
                        .handle(|dto| async move { module.database().get_order(dto).await })
                        .await
                        .map_err(ErrorStatus::from)?
                        .ok_or_else(|| {
                            ErrorStatus::from(Report::new(KernelError::not_found("Order", id)))
                        })
                },
            )
            .delete(
                |State(module): State<AppModule<D>>, Path(id): Path<Uuid>| async move {
                    Controller::new(OrderTransformer, OrderPresenter)
                        .intake(CancelOrderRequest::new(id))
                        .handle(|dto| async move { module.database().cancel_order(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/orders/:id/ship",
            post(
                |State(module): State<AppModule<D>>, Path(id): Path<Uuid>| async move {
                    Controller::new(OrderTransformer, OrderPresenter)
                        .intake(ShipOrderRequest::new(id))
                        .handle(|dto| async move { module.database().ship_order(dto).await })
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
    }
}
